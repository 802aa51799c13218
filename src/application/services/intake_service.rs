use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;

use crate::application::ports::{DocumentCache, JobRegistry, RegistryError};
use crate::domain::{
    ErrorKind, InputRef, Job, JobError, JobId, JobKind, Payload, TransitionError, URL_SENTINEL,
};

/// A buffered file received by the multi-file intake.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Result of a multi-file intake: the created job plus the filenames that
/// failed validation and were left out of it.
#[derive(Debug, Clone)]
pub struct IntakeOutcome {
    pub job: Job,
    pub rejected: Vec<String>,
}

/// Validates uploads, reads them with progress reporting, and attaches the
/// resulting payload to a fresh job.
pub struct IntakeService {
    registry: Arc<dyn JobRegistry>,
    cache: Arc<dyn DocumentCache>,
    max_file_size: u64,
}

impl IntakeService {
    pub fn new(
        registry: Arc<dyn JobRegistry>,
        cache: Arc<dyn DocumentCache>,
        max_file_size_mb: u64,
    ) -> Self {
        Self {
            registry,
            cache,
            max_file_size: max_file_size_mb * 1024 * 1024,
        }
    }

    /// Single-file intake. A MIME mismatch rejects the upload before any job
    /// is created; a failure mid-read fails the already-created job with
    /// `ReadFailure`. Progress is scaled against `declared_len` when the
    /// client supplied one.
    #[tracing::instrument(skip(self, stream, declared_len), fields(kind = %kind))]
    pub async fn intake_file(
        &self,
        kind: JobKind,
        filename: &str,
        mime: &str,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
        declared_len: Option<u64>,
    ) -> Result<Job, IntakeError> {
        if !kind.accepts_mime(mime) {
            tracing::warn!(mime, "Rejected upload with unsupported type");
            return Err(IntakeError::Rejected(JobError::new(
                ErrorKind::InvalidInputType,
                format!("Unsupported file type: {}", mime),
            )));
        }

        let mut job = Job::new(kind);
        job.begin_reading(filename)?;
        self.registry.insert(&job).await?;

        let mut data: Vec<u8> = Vec::new();
        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    let error =
                        JobError::new(ErrorKind::ReadFailure, format!("Failed to read file: {}", e));
                    return self.fail_job(job, error).await;
                }
            };
            data.extend_from_slice(&bytes);

            if data.len() as u64 > self.max_file_size {
                let error = JobError::new(
                    ErrorKind::ReadFailure,
                    format!("File exceeds the maximum size of {} bytes", self.max_file_size),
                );
                return self.fail_job(job, error).await;
            }

            if let Some(total) = declared_len.filter(|t| *t > 0) {
                // Stay below 100 until the payload is attached.
                let pct = ((data.len() as u64).saturating_mul(100) / total).min(99) as u8;
                job.set_progress(pct);
                self.registry.save(&job).await?;
            }
        }

        let payload = Payload::new(mime, data);
        if mime == "application/pdf" {
            if let Err(e) = self.cache.store(filename, &payload).await {
                tracing::warn!(error = %e, "Failed to update last-document cache");
            }
        }

        job.input_ready(InputRef::Inline(payload))?;
        self.registry.save(&job).await?;

        tracing::info!(job_id = %job.id.as_uuid(), filename, "File intake complete");
        Ok(job)
    }

    /// Multi-file intake for image collections. Each file is validated
    /// independently; the valid subset proceeds and rejected filenames are
    /// reported back. Partial success is preferred over all-or-nothing.
    #[tracing::instrument(skip(self, files), fields(kind = %kind, files = files.len()))]
    pub async fn intake_files(
        &self,
        kind: JobKind,
        files: Vec<IncomingFile>,
    ) -> Result<IntakeOutcome, IntakeError> {
        let mut accepted: Vec<IncomingFile> = Vec::new();
        let mut rejected: Vec<String> = Vec::new();
        for file in files {
            if kind.accepts_mime(&file.mime) && file.bytes.len() as u64 <= self.max_file_size {
                accepted.push(file);
            } else {
                rejected.push(file.filename);
            }
        }

        if accepted.is_empty() {
            return Err(IntakeError::Rejected(JobError::new(
                ErrorKind::InvalidInputType,
                "No files of an accepted type were provided",
            )));
        }
        if !rejected.is_empty() {
            tracing::warn!(rejected = rejected.len(), "Some files were rejected during intake");
        }

        let mut job = Job::new(kind);
        job.begin_reading(accepted[0].filename.clone())?;
        self.registry.insert(&job).await?;

        let payloads: Vec<Payload> = accepted
            .into_iter()
            .map(|f| Payload::new(f.mime, f.bytes))
            .collect();
        job.input_ready(InputRef::Batch(payloads))?;
        self.registry.save(&job).await?;

        Ok(IntakeOutcome { job, rejected })
    }

    /// Creates a job carrying a remote reference. No read phase: the fetch
    /// happens server-side when the job runs.
    #[tracing::instrument(skip(self), fields(kind = %kind))]
    pub async fn intake_remote(&self, kind: JobKind, url: &str) -> Result<Job, IntakeError> {
        if !kind.accepts_remote_input() {
            return Err(IntakeError::Rejected(JobError::new(
                ErrorKind::ValidationFailure,
                format!("Job kind {} does not accept a URL input", kind),
            )));
        }

        // Remote references travel in their sentinel wire form; parsing
        // also enforces a non-empty URL.
        let input = InputRef::parse(&format!("{URL_SENTINEL}{url}")).map_err(|e| {
            IntakeError::Rejected(JobError::new(ErrorKind::ValidationFailure, e.to_string()))
        })?;

        let mut job = Job::new(kind);
        job.input_ready(input)?;
        self.registry.insert(&job).await?;

        tracing::info!(job_id = %job.id.as_uuid(), url, "Remote intake recorded");
        Ok(job)
    }

    async fn fail_job(&self, mut job: Job, error: JobError) -> Result<Job, IntakeError> {
        tracing::warn!(job_id = %job.id.as_uuid(), error = %error, "File intake failed");
        job.fail(error.clone())?;
        self.registry.save(&job).await?;
        Err(IntakeError::Failed {
            job_id: job.id,
            error,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// The upload was refused before a job was created.
    #[error("{0}")]
    Rejected(JobError),
    /// A job was created but its read phase failed.
    #[error("{error}")]
    Failed { job_id: JobId, error: JobError },
    #[error("registry: {0}")]
    Registry(#[from] RegistryError),
    #[error("state: {0}")]
    Transition(#[from] TransitionError),
}
