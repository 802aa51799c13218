use super::{ErrorKind, JobError, JobKind};

/// Operation parameters supplied by the user when starting a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunParams {
    pub target_language: Option<String>,
    pub voice: Option<String>,
}

impl RunParams {
    /// Checks that every parameter the kind requires is present and
    /// non-empty. Performed locally, before any remote call.
    pub fn validate_for(&self, kind: JobKind) -> Result<(), JobError> {
        match kind {
            JobKind::Translate => require(self.target_language.as_deref(), "targetLanguage"),
            JobKind::Narrate => require(self.voice.as_deref(), "voice"),
            _ => Ok(()),
        }
    }
}

fn require(value: Option<&str>, name: &str) -> Result<(), JobError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(JobError::new(
            ErrorKind::ValidationFailure,
            format!("Missing required parameter: {}", name),
        )),
    }
}
