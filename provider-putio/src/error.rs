//! Error types for the put.io files service

use bridge_traits::error::BridgeError;
use core_auth::AuthError;
use thiserror::Error;

/// Files service errors
///
/// `Unauthorised`, `InvalidUrl` and `InvalidParameters` are raised before
/// anything is sent. Everything that goes wrong after dispatch (network,
/// HTTP status, payload decoding) arrives as `Transport`.
#[derive(Error, Debug)]
pub enum FilesError {
    /// No access token in the credential store
    #[error("Unauthorised: no access token available")]
    Unauthorised,

    /// The request URL could not be formed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Parameters could not be encoded into a request body
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Network, HTTP status or decoding failure reported by the transport
    #[error(transparent)]
    Transport(#[from] BridgeError),
}

impl FilesError {
    /// Whether the error is one of the request-preparation failures
    /// (`Unauthorised`, `InvalidUrl`, `InvalidParameters`).
    ///
    /// `Transport` errors report `false`, including the
    /// `Transport(NotAvailable)` delivered synchronously when no Tokio runtime
    /// is running. That failure also sends nothing; callers that need to know
    /// whether a request went out should check for a returned handle instead.
    pub fn is_pre_dispatch(&self) -> bool {
        !matches!(self, FilesError::Transport(_))
    }
}

impl From<AuthError> for FilesError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::NotAuthenticated => FilesError::Unauthorised,
        }
    }
}

impl From<url::ParseError> for FilesError {
    fn from(error: url::ParseError) -> Self {
        FilesError::InvalidUrl(error.to_string())
    }
}

/// Result type for files operations
pub type Result<T> = std::result::Result<T, FilesError>;

impl From<FilesError> for BridgeError {
    fn from(error: FilesError) -> Self {
        match error {
            FilesError::Transport(e) => e,
            other => BridgeError::OperationFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            FilesError::Unauthorised.to_string(),
            "Unauthorised: no access token available"
        );

        let error = FilesError::Transport(BridgeError::HttpStatus {
            status: 404,
            message: "File not found".to_string(),
        });
        assert_eq!(error.to_string(), "HTTP 404: File not found");
    }

    #[test]
    fn test_auth_error_maps_to_unauthorised() {
        let error: FilesError = AuthError::NotAuthenticated.into();
        assert!(matches!(error, FilesError::Unauthorised));
        assert!(error.is_pre_dispatch());
    }

    #[test]
    fn test_url_error_maps_to_invalid_url() {
        let error: FilesError = url::Url::parse("::nope").unwrap_err().into();
        assert!(matches!(error, FilesError::InvalidUrl(_)));
    }

    #[test]
    fn test_error_conversion() {
        let bridge_error: BridgeError = FilesError::InvalidParameters("bad".to_string()).into();
        assert!(matches!(bridge_error, BridgeError::OperationFailed(_)));

        let bridge_error: BridgeError =
            FilesError::Transport(BridgeError::NotAvailable("offline".to_string())).into();
        assert!(matches!(bridge_error, BridgeError::NotAvailable(_)));
        assert!(!FilesError::Transport(bridge_error).is_pre_dispatch());
    }
}
