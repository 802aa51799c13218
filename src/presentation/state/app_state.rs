use std::sync::Arc;

use crate::application::ports::DocumentCache;
use crate::application::services::{IntakeService, JobService};

#[derive(Clone)]
pub struct AppState {
    pub job_service: Arc<JobService>,
    pub intake: Arc<IntakeService>,
    pub cache: Arc<dyn DocumentCache>,
}
