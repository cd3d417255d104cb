use thiserror::Error;

/// Failure reported by a host capability
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    /// The request did not finish within its timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// A payload could not be decoded into the expected shape
    #[error("Decoding failed: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// HTTP status carried by the error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            BridgeError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
