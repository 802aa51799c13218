use serde::Serialize;

use crate::domain::Job;
use crate::presentation::presenter::{self, ResultView};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobErrorBody {
    pub kind: String,
    pub message: String,
}

/// Wire representation of a job, shared by every job-returning endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: String,
    pub kind: String,
    pub status: String,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JobErrorBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected_files: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl JobResponse {
    pub fn from_job(job: &Job) -> Self {
        Self {
            id: job.id.to_string(),
            kind: job.kind.to_string(),
            status: job.status.as_str().to_string(),
            progress: job.progress,
            filename: job.filename.clone(),
            error: job.error.as_ref().map(|e| JobErrorBody {
                kind: e.kind.as_str().to_string(),
                message: e.message.clone(),
            }),
            result: job
                .result
                .as_ref()
                .map(|r| presenter::present(r, job.filename.as_deref())),
            rejected_files: Vec::new(),
            created_at: job.created_at.to_rfc3339(),
            updated_at: job.updated_at.to_rfc3339(),
        }
    }

    pub fn with_rejected(mut self, rejected: Vec<String>) -> Self {
        self.rejected_files = rejected;
        self
    }
}
