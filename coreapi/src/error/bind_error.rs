//! Request binding errors.

use coreapi_define::SchemaError;
use thiserror::Error;

use super::CodecError;
use crate::validate::ErrorReport;

/// Errors raised while turning a request record into an HTTP request.
#[derive(Debug, Error)]
pub enum BindError {
    /// The request record failed validation; nothing was sent.
    #[error("Request rejected: {0}")]
    Invalid(ErrorReport),

    /// A path placeholder has no value.
    #[error("Path placeholder '{{{placeholder}}}' of operation '{operation}' is unbound")]
    PathPlaceholderUnbound {
        /// The operation being bound.
        operation: String,
        /// The placeholder name.
        placeholder: String,
    },

    /// A path value would be read as a `.` or `..` segment and change the route.
    #[error("Path placeholder '{{{placeholder}}}' of operation '{operation}' cannot be '{value}'")]
    DotSegment {
        /// The operation being bound.
        operation: String,
        /// The placeholder name.
        placeholder: String,
        /// The rejected value.
        value: String,
    },

    /// A header value cannot be sent over HTTP.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader {
        /// Header wire name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Encoding a bound value failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A descriptor the binder needs is missing.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The bound URL does not parse.
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

impl BindError {
    /// Returns the validation report for [`BindError::Invalid`].
    pub fn report(&self) -> Option<&ErrorReport> {
        match self {
            Self::Invalid(report) => Some(report),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_placeholder_display() {
        let err = BindError::PathPlaceholderUnbound {
            operation: "GetInstance".to_string(),
            placeholder: "instanceId".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Path placeholder '{instanceId}' of operation 'GetInstance' is unbound"
        );
        assert!(err.report().is_none());
    }

    #[test]
    fn test_dot_segment_display() {
        let err = BindError::DotSegment {
            operation: "DeleteVolume".to_string(),
            placeholder: "volumeId".to_string(),
            value: "..".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Path placeholder '{volumeId}' of operation 'DeleteVolume' cannot be '..'"
        );
    }
}
