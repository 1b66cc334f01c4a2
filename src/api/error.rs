//! Error taxonomy for calls to the drafting backend.

use thiserror::Error;

/// Failures surfaced by the backend client.
///
/// All three variants render identically in the UI (a dismissible banner) and
/// none are retried automatically.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Transport-level failure: DNS, connect, TLS, or a broken body stream.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered but reported failure. Carries the server-provided
    /// error message when one exists, otherwise the HTTP status.
    #[error("{0}")]
    Server(String),

    /// Rejected client-side before any request was sent (empty file path,
    /// disallowed extension, oversized upload).
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Message suitable for the inline error banner.
    pub fn banner_message(&self) -> String {
        self.to_string()
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_displays_message_verbatim() {
        let err = ApiError::Server("Draft not found".to_string());
        assert_eq!(err.to_string(), "Draft not found");
    }

    #[test]
    fn network_error_is_prefixed() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");
        assert!(err.is_network());
    }
}
