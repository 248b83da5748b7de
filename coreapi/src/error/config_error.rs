//! Client configuration errors.

use thiserror::Error;

/// Errors in client configuration.
///
/// These errors occur while building a [`ClientConfig`](crate::ClientConfig),
/// typically from bad environment values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required configuration field is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A configuration value could not be parsed.
    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        /// The field or environment variable.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A default header name or value is not valid HTTP.
    #[error("Invalid default header '{name}': {reason}")]
    InvalidHeader {
        /// Header name as given.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(field: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field() {
        let err = ConfigError::missing_field("endpoint");
        assert_eq!(err.to_string(), "Missing required field: endpoint");
    }

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::InvalidUrl(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_invalid_value() {
        let err = ConfigError::invalid_value("CORE_API_TIMEOUT_SECS", "soon", "not a number");
        assert_eq!(
            err.to_string(),
            "Invalid value for CORE_API_TIMEOUT_SECS: 'soon' (not a number)"
        );
    }
}
