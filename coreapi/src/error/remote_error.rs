//! Errors returned by the remote service.

use std::fmt;

/// A non-2xx response.
///
/// The status is always present. `code` and `message` come from the standard
/// error body when it decodes; when it does not, `body_error` says why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// HTTP status code.
    pub status: u16,
    /// Service error code (e.g. `NotAuthorizedOrNotFound`).
    pub code: Option<String>,
    /// Human-readable message.
    pub message: Option<String>,
    /// Echoed `opc-request-id`.
    pub request_id: Option<String>,
    /// Why the error body could not be decoded, if it could not.
    pub body_error: Option<String>,
}

impl RemoteError {
    /// Returns `true` for throttling and server-side failures.
    pub fn is_retryable(&self) -> bool {
        self.status >= 500 || self.status == 429
    }

    /// Returns `true` for 401 and 403.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status, 401 | 403)
    }

    /// Returns `true` for 404.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(code) = &self.code {
            write!(f, " {code}")?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (opc-request-id: {request_id})")?;
        }
        Ok(())
    }
}

impl std::error::Error for RemoteError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(status: u16) -> RemoteError {
        RemoteError {
            status,
            code: Some("NotAuthorizedOrNotFound".to_string()),
            message: Some("Authorization failed or requested resource not found.".to_string()),
            request_id: Some("req-1".to_string()),
            body_error: None,
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            error(404).to_string(),
            "HTTP 404 NotAuthorizedOrNotFound: Authorization failed or requested resource not found. (opc-request-id: req-1)"
        );
    }

    #[test]
    fn test_display_without_body() {
        let err = RemoteError {
            status: 502,
            code: None,
            message: None,
            request_id: None,
            body_error: Some("empty body".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP 502");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_classification() {
        assert!(error(429).is_retryable());
        assert!(!error(400).is_retryable());
        assert!(error(401).is_auth_failure());
        assert!(error(404).is_not_found());
    }
}
