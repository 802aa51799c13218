use std::sync::Arc;

use crate::application::ports::{JobRegistry, RegistryError};
use crate::domain::{
    ErrorKind, InputRef, Job, JobError, JobId, JobKind, JobResult, RunParams, RunToken,
    TransitionError,
};

use super::operation_gateway::{OperationError, OperationGateway};

/// Drives job lifecycles: starting runs, recording their outcomes, and
/// resetting. Owns the stale-response guard: a run's outcome only lands if
/// the job still carries the run's token.
pub struct JobService {
    registry: Arc<dyn JobRegistry>,
    gateway: Arc<OperationGateway>,
}

impl JobService {
    pub fn new(registry: Arc<dyn JobRegistry>, gateway: Arc<OperationGateway>) -> Self {
        Self { registry, gateway }
    }

    pub async fn get(&self, id: JobId) -> Result<Option<Job>, RegistryError> {
        self.registry.get(id).await
    }

    /// Validates parameters locally, moves the job to `Running` and executes
    /// the operation asynchronously. A validation failure leaves the job in
    /// `ReadyToRun` and never contacts the gateway.
    pub async fn run(self: &Arc<Self>, id: JobId, params: RunParams) -> Result<Job, JobServiceError> {
        let mut job = self
            .registry
            .get(id)
            .await?
            .ok_or_else(|| JobServiceError::NotFound(id.as_uuid().to_string()))?;

        params
            .validate_for(job.kind)
            .map_err(JobServiceError::Validation)?;
        let input = job.input.clone().ok_or_else(|| {
            JobServiceError::Validation(JobError::new(
                ErrorKind::ValidationFailure,
                "No input attached to job",
            ))
        })?;

        let token = RunToken::new();
        job.start(token).map_err(JobServiceError::NotRunnable)?;
        self.registry.save(&job).await?;

        tracing::info!(job_id = %job.id.as_uuid(), kind = %job.kind, "Job run started");

        let service = Arc::clone(self);
        let kind = job.kind;
        tokio::spawn(async move {
            let outcome = service.perform(kind, &input, &params).await;
            if let Err(e) = service.land(id, token, outcome).await {
                tracing::error!(error = %e, job_id = %id.as_uuid(), "Failed to record job outcome");
            }
        });

        Ok(job)
    }

    /// Returns the job to `Idle`. Does not cancel an in-flight operation;
    /// its late result is discarded by the token guard.
    pub async fn reset(&self, id: JobId) -> Result<Job, JobServiceError> {
        let mut job = self
            .registry
            .get(id)
            .await?
            .ok_or_else(|| JobServiceError::NotFound(id.as_uuid().to_string()))?;
        job.reset();
        self.registry.save(&job).await?;
        Ok(job)
    }

    async fn perform(
        &self,
        kind: JobKind,
        input: &InputRef,
        params: &RunParams,
    ) -> Result<JobResult, OperationError> {
        match kind {
            JobKind::Summarize => self.gateway.summarize(input).await,
            JobKind::Translate => {
                let language = params.target_language.as_deref().unwrap_or_default();
                self.gateway.translate(input, language).await
            }
            JobKind::Narrate => {
                let voice = params.voice.as_deref().unwrap_or_default();
                self.gateway.narrate(input, voice).await
            }
            JobKind::DetectOutfit => match input {
                InputRef::Inline(image) => self.gateway.detect_outfit(image).await,
                _ => Err(OperationError::new(
                    ErrorKind::ValidationFailure,
                    "Outfit detection requires an inline image",
                )),
            },
            JobKind::ConvertToImages => self.gateway.convert_to_images(input).await,
            JobKind::ConvertFromImages => match input {
                InputRef::Batch(images) => self.gateway.convert_from_images(images).await,
                _ => Err(OperationError::new(
                    ErrorKind::ValidationFailure,
                    "Image composition requires a batch of images",
                )),
            },
        }
    }

    async fn land(
        &self,
        id: JobId,
        token: RunToken,
        outcome: Result<JobResult, OperationError>,
    ) -> Result<(), JobServiceError> {
        let Some(mut job) = self.registry.get(id).await? else {
            tracing::debug!(job_id = %id.as_uuid(), "Discarding result for removed job");
            return Ok(());
        };

        if !job.accepts_result_for(token) {
            tracing::debug!(
                job_id = %id.as_uuid(),
                status = %job.status,
                "Discarding stale operation result"
            );
            return Ok(());
        }

        let transition = match outcome {
            Ok(result) => {
                tracing::info!(job_id = %id.as_uuid(), "Job succeeded");
                job.succeed(result)
            }
            Err(e) => {
                tracing::warn!(job_id = %id.as_uuid(), error = %e, "Job failed");
                job.fail(JobError::from(e))
            }
        };
        if let Err(e) = transition {
            tracing::error!(job_id = %id.as_uuid(), error = %e, "Unexpected job state on completion");
            return Ok(());
        }

        self.registry.save(&job).await?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JobServiceError {
    #[error("job not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(JobError),
    #[error("{0}")]
    NotRunnable(TransitionError),
    #[error("registry: {0}")]
    Registry(#[from] RegistryError),
}
