use thiserror::Error;

/// Batfish client unified error type
#[derive(Error, Debug)]
pub enum BatfishError {
    #[error("Connectivity error: {message}")]
    Connectivity { message: String },

    #[error("Service error: {message}")]
    Service { status: Option<u16>, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Session error: {message}")]
    Session { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Output(String),
}

impl BatfishError {
    /// HTTP status reported by the service, if the error came from one
    pub fn status(&self) -> Option<u16> {
        match self {
            BatfishError::Service { status, .. } => *status,
            _ => None,
        }
    }
}

pub type BatfishResult<T> = Result<T, BatfishError>;
