use chrono::{DateTime, Utc};

use super::{InputRef, JobError, JobId, JobKind, JobResult, JobStatus, RunToken};

/// One user-initiated processing request and its lifecycle state.
///
/// Transitions only move forward
/// (`Idle -> ReadingInput -> ReadyToRun -> Running -> Succeeded | Failed`)
/// except `reset`, which returns unconditionally to `Idle` from any state.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub kind: JobKind,
    pub status: JobStatus,
    pub input: Option<InputRef>,
    pub filename: Option<String>,
    pub progress: u8,
    pub result: Option<JobResult>,
    pub error: Option<JobError>,
    pub run_token: Option<RunToken>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new(kind: JobKind) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            kind,
            status: JobStatus::Idle,
            input: None,
            filename: None,
            progress: 0,
            result: None,
            error: None,
            run_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn begin_reading(&mut self, filename: impl Into<String>) -> Result<(), TransitionError> {
        self.transition(JobStatus::Idle, JobStatus::ReadingInput)?;
        self.filename = Some(filename.into());
        Ok(())
    }

    /// Records read progress in [0, 100]. Only meaningful while
    /// `ReadingInput`; values lower than the current progress are ignored so
    /// reported progress is monotonically non-decreasing.
    pub fn set_progress(&mut self, progress: u8) {
        if self.status != JobStatus::ReadingInput {
            return;
        }
        let clamped = progress.min(100);
        if clamped > self.progress {
            self.progress = clamped;
            self.touch();
        }
    }

    /// Attaches the fully read input and moves to `ReadyToRun`. Inputs that
    /// need no read phase (remote references) may go there straight from
    /// `Idle`.
    pub fn input_ready(&mut self, input: InputRef) -> Result<(), TransitionError> {
        match self.status {
            JobStatus::Idle | JobStatus::ReadingInput => {
                self.progress = 100;
                self.input = Some(input);
                self.status = JobStatus::ReadyToRun;
                self.touch();
                Ok(())
            }
            from => Err(TransitionError::InvalidTransition {
                from,
                to: JobStatus::ReadyToRun,
            }),
        }
    }

    /// Starts a run. Only legal from `ReadyToRun`, so at most one run is in
    /// flight per job.
    pub fn start(&mut self, token: RunToken) -> Result<(), TransitionError> {
        self.transition(JobStatus::ReadyToRun, JobStatus::Running)?;
        self.run_token = Some(token);
        Ok(())
    }

    pub fn succeed(&mut self, result: JobResult) -> Result<(), TransitionError> {
        self.transition(JobStatus::Running, JobStatus::Succeeded)?;
        self.result = Some(result);
        self.run_token = None;
        Ok(())
    }

    /// Fails the job. Legal while reading input (read errors) or running
    /// (operation errors).
    pub fn fail(&mut self, error: JobError) -> Result<(), TransitionError> {
        match self.status {
            JobStatus::ReadingInput | JobStatus::Running => {
                self.status = JobStatus::Failed;
                self.error = Some(error);
                self.run_token = None;
                self.touch();
                Ok(())
            }
            from => Err(TransitionError::InvalidTransition {
                from,
                to: JobStatus::Failed,
            }),
        }
    }

    /// Returns to `Idle` from any state, releasing the input and clearing
    /// result, error and progress. A no-op on a job already in `Idle`.
    /// Clearing the run token makes any still in-flight operation stale.
    pub fn reset(&mut self) {
        if self.status == JobStatus::Idle {
            return;
        }
        self.status = JobStatus::Idle;
        self.input = None;
        self.filename = None;
        self.progress = 0;
        self.result = None;
        self.error = None;
        self.run_token = None;
        self.touch();
    }

    /// Whether a completing run keyed by `token` may still land its result.
    pub fn accepts_result_for(&self, token: RunToken) -> bool {
        self.status == JobStatus::Running && self.run_token == Some(token)
    }

    fn transition(&mut self, from: JobStatus, to: JobStatus) -> Result<(), TransitionError> {
        if self.status != from {
            return Err(TransitionError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TransitionError {
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },
}
