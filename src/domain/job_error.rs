use std::fmt;

/// Coarse classification of every expected failure a job can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInputType,
    ReadFailure,
    FetchFailure,
    InvalidRemoteContentType,
    ExtractionFailure,
    ModelFailure,
    EmptyDocument,
    ValidationFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInputType => "INVALID_INPUT_TYPE",
            ErrorKind::ReadFailure => "READ_FAILURE",
            ErrorKind::FetchFailure => "FETCH_FAILURE",
            ErrorKind::InvalidRemoteContentType => "INVALID_REMOTE_CONTENT_TYPE",
            ErrorKind::ExtractionFailure => "EXTRACTION_FAILURE",
            ErrorKind::ModelFailure => "MODEL_FAILURE",
            ErrorKind::EmptyDocument => "EMPTY_DOCUMENT",
            ErrorKind::ValidationFailure => "VALIDATION_FAILURE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Human-readable failure carried by a job in `Failed` state.
#[derive(Debug, Clone, PartialEq)]
pub struct JobError {
    pub kind: ErrorKind,
    pub message: String,
}

impl JobError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
