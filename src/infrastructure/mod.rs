pub mod cache;
pub mod fetch;
pub mod model;
pub mod observability;
pub mod pdf;
pub mod registry;
