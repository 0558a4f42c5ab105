//! Error type shared by the remote service clients

use thiserror::Error;

/// Errors returned by the identity, SMS and filter-option services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request was rejected locally before anything was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The service could not be reached (DNS, connect, TLS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The service answered with a body we could not understand
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Client-side errors (4xx) will not succeed on an identical retry
    pub fn is_client_error(&self) -> bool {
        match self {
            ServiceError::InvalidRequest(_) => true,
            ServiceError::Rejected { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display() {
        let err = ServiceError::Rejected {
            status: 404,
            message: "no such user".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request rejected with status 404: no such user"
        );
    }

    #[test]
    fn test_is_client_error() {
        assert!(ServiceError::InvalidRequest("x".into()).is_client_error());
        assert!(ServiceError::Rejected {
            status: 422,
            message: String::new()
        }
        .is_client_error());
        assert!(!ServiceError::Rejected {
            status: 503,
            message: String::new()
        }
        .is_client_error());
        assert!(!ServiceError::Transport("refused".into()).is_client_error());
    }
}
