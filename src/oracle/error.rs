//! Text oracle error types.

use thiserror::Error;

/// Errors that can occur while asking the hosted model for text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// No API key was found in the environment.
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),

    /// The HTTP request could not be built or sent.
    #[error("oracle request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("oracle returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode oracle response: {0}")]
    Decode(String),

    /// The response contained no text.
    #[error("oracle returned no text")]
    EmptyResponse,
}

impl OracleError {
    /// Returns true if repeating the request later might succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::MissingApiKey(_) | Self::Decode(_) | Self::EmptyResponse => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OracleError::MissingApiKey("GEMINI_API_KEY".to_string());
        assert!(err.to_string().contains("$GEMINI_API_KEY"));

        let err = OracleError::Status {
            status: 403,
            message: "PERMISSION_DENIED".to_string(),
        };
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("PERMISSION_DENIED"));
    }

    #[test]
    fn test_is_transient() {
        assert!(OracleError::Request("reset".into()).is_transient());
        assert!(OracleError::Status {
            status: 503,
            message: String::new()
        }
        .is_transient());
        assert!(OracleError::Status {
            status: 429,
            message: String::new()
        }
        .is_transient());
        assert!(!OracleError::Status {
            status: 400,
            message: String::new()
        }
        .is_transient());
        assert!(!OracleError::MissingApiKey("K".into()).is_transient());
        assert!(!OracleError::EmptyResponse.is_transient());
    }
}
