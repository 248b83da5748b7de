//! HTTP client and network errors.

use thiserror::Error;

/// Errors from the executor layer.
///
/// These errors represent network-level failures and cancellation; remote
/// errors (non-2xx responses) are reported as
/// [`RemoteError`](super::RemoteError) instead.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request exceeded the configured timeout.
    #[error("Request timeout after {duration_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        duration_ms: u64,
    },

    /// Failed to establish connection to the server.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The caller cancelled the call.
    #[error("Call cancelled")]
    Cancelled,
}

impl ClientError {
    /// Returns `true` if this error is retryable.
    ///
    /// Timeout and connection errors are typically retryable; cancellation
    /// never is.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection(_) => true,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Cancelled => false,
        }
    }

    /// Returns `true` for [`ClientError::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns the HTTP status code carried by a reqwest error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_retryable() {
        let err = ClientError::Timeout { duration_ms: 5000 };
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "Request timeout after 5000ms");
    }

    #[test]
    fn test_connection_is_retryable() {
        let err = ClientError::Connection("connection refused".to_string());
        assert!(err.is_retryable());
    }

    #[test]
    fn test_cancelled_is_not_retryable() {
        let err = ClientError::Cancelled;
        assert!(!err.is_retryable());
        assert!(err.is_cancelled());
        assert_eq!(err.status_code(), None);
    }
}
