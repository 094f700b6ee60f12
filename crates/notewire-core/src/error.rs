//! Error types for notewire.

use thiserror::Error;

/// Result type alias using notewire's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for notewire operations.
///
/// The taxonomy distinguishes failures that never reached the server
/// ([`Error::Transport`]), definitive authentication rejections
/// ([`Error::Unauthorized`] / [`Error::Forbidden`]), and every other
/// non-2xx status ([`Error::Status`]). Session restore treats only the
/// authentication rejections as fatal to the stored credential.
#[derive(Error, Debug)]
pub enum Error {
    /// No response reached the client (DNS, connect timeout, TLS failure)
    #[error("Transport error: {0}")]
    Transport(String),

    /// HTTP 401 — credential rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// HTTP 403 — authenticated but not allowed
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Any other non-2xx HTTP status (5xx included)
    #[error("Server returned {code}: {message}")]
    Status { code: u16, message: String },

    /// Response was well-formed but missing a required field
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Session persistence failed
    #[error("Session store error: {0}")]
    Store(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Build the appropriate error variant for a non-2xx HTTP status.
    pub fn from_status(code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            401 => Error::Unauthorized(message),
            403 => Error::Forbidden(message),
            _ => Error::Status { code, message },
        }
    }

    /// True for HTTP 401/403 — the only failures that invalidate a stored
    /// credential during session restore.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, Error::Unauthorized(_) | Error::Forbidden(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Error::Transport(e.to_string())
        } else if e.is_decode() {
            Error::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            Error::from_status(status.as_u16(), e.to_string())
        } else {
            Error::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_transport() {
        let err = Error::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn test_error_display_unauthorized() {
        let err = Error::Unauthorized("invalid token".to_string());
        assert_eq!(err.to_string(), "Unauthorized: invalid token");
    }

    #[test]
    fn test_error_display_forbidden() {
        let err = Error::Forbidden("insufficient permissions".to_string());
        assert_eq!(err.to_string(), "Forbidden: insufficient permissions");
    }

    #[test]
    fn test_error_display_status() {
        let err = Error::Status {
            code: 500,
            message: "internal".to_string(),
        };
        assert_eq!(err.to_string(), "Server returned 500: internal");
    }

    #[test]
    fn test_error_display_empty_response() {
        let err = Error::EmptyResponse("no user in response".to_string());
        assert_eq!(err.to_string(), "Empty response: no user in response");
    }

    #[test]
    fn test_from_status_maps_auth_codes() {
        assert!(matches!(
            Error::from_status(401, "x"),
            Error::Unauthorized(_)
        ));
        assert!(matches!(Error::from_status(403, "x"), Error::Forbidden(_)));
        assert!(matches!(
            Error::from_status(500, "x"),
            Error::Status { code: 500, .. }
        ));
        assert!(matches!(
            Error::from_status(404, "x"),
            Error::Status { code: 404, .. }
        ));
    }

    #[test]
    fn test_is_auth_rejection() {
        assert!(Error::Unauthorized("x".into()).is_auth_rejection());
        assert!(Error::Forbidden("x".into()).is_auth_rejection());
        assert!(!Error::Status {
            code: 500,
            message: "x".into()
        }
        .is_auth_rejection());
        assert!(!Error::Transport("x".into()).is_auth_rejection());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Decode(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Decode error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
