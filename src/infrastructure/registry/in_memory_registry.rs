use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{JobRegistry, RegistryError};
use crate::domain::{Job, JobId};

/// Process-local job registry. Jobs live only as long as the server does.
#[derive(Default)]
pub struct InMemoryJobRegistry {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl InMemoryJobRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRegistry for InMemoryJobRegistry {
    async fn insert(&self, job: &Job) -> Result<(), RegistryError> {
        self.jobs.write().await.insert(job.id, job.clone());
        Ok(())
    }

    async fn get(&self, id: JobId) -> Result<Option<Job>, RegistryError> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn save(&self, job: &Job) -> Result<(), RegistryError> {
        let mut jobs = self.jobs.write().await;
        if !jobs.contains_key(&job.id) {
            return Err(RegistryError::NotFound(job.id.to_string()));
        }
        jobs.insert(job.id, job.clone());
        Ok(())
    }
}
