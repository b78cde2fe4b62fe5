//! Error types for Moviedesk
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Moviedesk operations
///
/// Covers configuration loading, session persistence, local form
/// validation, and every way a call against the catalog backend can fail.
#[derive(Error, Debug)]
pub enum MoviedeskError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A protected call was attempted without a stored token
    #[error("No authentication token found")]
    NotAuthenticated,

    /// Local form validation failed before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend answered with a non-success status
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        /// HTTP status code returned by the backend
        status: u16,
        /// Server-supplied message, when the body carried one
        message: Option<String>,
    },

    /// The backend answered 2xx with a body in no known shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The backend could not be reached at all
    #[error("Connection failed: {0}")]
    Connectivity(String),

    /// Session store failures other than I/O (corrupt content, etc.)
    #[error("Session store error: {0}")]
    SessionStore(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

impl MoviedeskError {
    /// HTTP status class of the failure, as the form flows classify it.
    ///
    /// Transport failures report `0`, mirroring what a browser reports for
    /// an unreachable host. Failures that never touched the network have no
    /// status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Connectivity(_) => Some(0),
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => Some(e.status().map(|s| s.as_u16()).unwrap_or(0)),
            _ => None,
        }
    }

    /// Server-supplied message carried by an API failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Extracts the HTTP status class from an `anyhow` error chain.
///
/// Returns `None` when the chain holds no [`MoviedeskError`] or the error
/// never reached the network.
pub fn status_of(err: &anyhow::Error) -> Option<u16> {
    err.downcast_ref::<MoviedeskError>()
        .and_then(MoviedeskError::status)
}

/// Extracts the server-supplied message from an `anyhow` error chain.
pub fn server_message_of(err: &anyhow::Error) -> Option<String> {
    err.downcast_ref::<MoviedeskError>()
        .and_then(|e| e.server_message().map(str::to_string))
}

/// Result type alias for Moviedesk operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = MoviedeskError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_not_authenticated_display() {
        let error = MoviedeskError::NotAuthenticated;
        assert_eq!(error.to_string(), "No authentication token found");
    }

    #[test]
    fn test_api_error_display_with_message() {
        let error = MoviedeskError::Api {
            status: 400,
            message: Some("bad id".to_string()),
        };
        assert_eq!(error.to_string(), "API error (400): bad id");
    }

    #[test]
    fn test_api_error_display_without_message() {
        let error = MoviedeskError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(error.to_string(), "API error (500): no message");
    }

    #[test]
    fn test_connectivity_status_is_zero() {
        let error = MoviedeskError::Connectivity("refused".to_string());
        assert_eq!(error.status(), Some(0));
    }

    #[test]
    fn test_api_status_passthrough() {
        let error = MoviedeskError::Api {
            status: 401,
            message: None,
        };
        assert_eq!(error.status(), Some(401));
    }

    #[test]
    fn test_local_errors_have_no_status() {
        assert_eq!(MoviedeskError::NotAuthenticated.status(), None);
        assert_eq!(
            MoviedeskError::Validation("missing".to_string()).status(),
            None
        );
    }

    #[test]
    fn test_status_of_through_anyhow() {
        let err: anyhow::Error = MoviedeskError::Api {
            status: 403,
            message: Some("nope".to_string()),
        }
        .into();
        assert_eq!(status_of(&err), Some(403));
        assert_eq!(server_message_of(&err), Some("nope".to_string()));
    }

    #[test]
    fn test_status_of_foreign_error_is_none() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(status_of(&err), None);
        assert_eq!(server_message_of(&err), None);
    }

    #[test]
    fn test_unexpected_response_display() {
        let error = MoviedeskError::UnexpectedResponse("expected a list".to_string());
        assert_eq!(error.to_string(), "Unexpected response: expected a list");
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: MoviedeskError = io_error.into();
        assert!(matches!(error, MoviedeskError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: MoviedeskError = json_error.into();
        assert!(matches!(error, MoviedeskError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: MoviedeskError = yaml_error.into();
        assert!(matches!(error, MoviedeskError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MoviedeskError>();
    }
}
