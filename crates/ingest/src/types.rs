use std::io;

/// Non-fatal issues encountered while reading a day's inputs.
#[derive(Debug, Clone)]
pub struct IngestIssue {
    pub file_path: String,
    pub message: String,
}

/// Errors emitted while reading telemetry.
#[derive(Debug)]
pub enum IngestError {
    Io(io::Error),
    Telemetry(serde_json::Error),
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {}", err),
            Self::Telemetry(err) => write!(f, "telemetry parse error: {}", err),
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Telemetry(err) => Some(err),
        }
    }
}

impl From<io::Error> for IngestError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Telemetry(err)
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
