mod cached_document;
mod health;
mod job_status;
mod link;
mod reset;
mod responses;
mod run;
mod upload;

pub use cached_document::cached_document_handler;
pub use health::health_handler;
pub use job_status::job_status_handler;
pub use link::link_handler;
pub use reset::reset_handler;
pub use responses::{ErrorResponse, JobResponse};
pub use run::run_handler;
pub use upload::upload_handler;
