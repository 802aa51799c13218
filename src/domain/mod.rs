mod job;
mod job_error;
mod job_id;
mod job_kind;
mod job_result;
mod job_status;
mod payload;
mod run_params;

pub use job::{Job, TransitionError};
pub use job_error::{ErrorKind, JobError};
pub use job_id::{JobId, RunToken};
pub use job_kind::JobKind;
pub use job_result::{EcommerceLink, JobResult, OutfitItem, ShoppingSuggestion};
pub use job_status::JobStatus;
pub use payload::{InputRef, Payload, PayloadError, URL_SENTINEL};
pub use run_params::RunParams;
