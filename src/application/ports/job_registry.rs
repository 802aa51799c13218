use async_trait::async_trait;

use crate::domain::{Job, JobId};

/// In-process store of live jobs. Jobs are not persisted beyond the current
/// session; a new job for the same feature supersedes the old one.
#[async_trait]
pub trait JobRegistry: Send + Sync {
    async fn insert(&self, job: &Job) -> Result<(), RegistryError>;

    async fn get(&self, id: JobId) -> Result<Option<Job>, RegistryError>;

    async fn save(&self, job: &Job) -> Result<(), RegistryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("job not found: {0}")]
    NotFound(String),
}
