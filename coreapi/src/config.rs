//! Client configuration.
//!
//! ## Examples
//!
//! ```
//! use std::time::Duration;
//! use coreapi::ClientConfig;
//!
//! let config = ClientConfig::for_region("us-ashburn-1")
//!     .unwrap()
//!     .timeout(Duration::from_secs(10))
//!     .default_header("x-team", "storage")
//!     .unwrap();
//!
//! assert_eq!(config.endpoint.as_str(), "https://iaas.us-ashburn-1.oraclecloud.com/20160918");
//! assert_eq!(config.timeout, Duration::from_secs(10));
//! ```

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::ConfigError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// API version path segment of the Core Services endpoint.
const API_VERSION: &str = "20160918";

/// Full endpoint override.
pub const ENV_ENDPOINT: &str = "CORE_API_ENDPOINT";
/// Region used to derive the endpoint when no override is set.
pub const ENV_REGION: &str = "CORE_API_REGION";
/// Request timeout in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "CORE_API_TIMEOUT_SECS";

/// Settings shared by every call a client makes.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL, including the API version segment.
    pub endpoint: Url,
    /// Per-request timeout enforced by the executor.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Headers added to every request.
    pub default_headers: HeaderMap,
}

impl ClientConfig {
    /// Creates a configuration for an explicit endpoint.
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("coreapi-rust/", env!("CARGO_PKG_VERSION")).to_string(),
            default_headers: HeaderMap::new(),
        }
    }

    /// Derives the regional endpoint `https://iaas.{region}.oraclecloud.com/20160918`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty region and
    /// [`ConfigError::InvalidUrl`] if the result does not parse.
    pub fn for_region(region: &str) -> Result<Self, ConfigError> {
        let region = region.trim();
        if region.is_empty() {
            return Err(ConfigError::invalid_value(ENV_REGION, region, "region is empty"));
        }
        let endpoint = Url::parse(&format!("https://iaas.{region}.oraclecloud.com/{API_VERSION}"))?;
        Ok(Self::new(endpoint))
    }

    /// Reads the configuration from the process environment.
    ///
    /// `CORE_API_ENDPOINT` wins over `CORE_API_REGION`; one of them must be
    /// set. `CORE_API_TIMEOUT_SECS` is optional.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingField`] when neither endpoint variable is
    /// set, and [`ConfigError::InvalidValue`] or [`ConfigError::InvalidUrl`]
    /// for values that do not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable lookup.
    ///
    /// ## Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = match (set(ENV_ENDPOINT), set(ENV_REGION)) {
            (Some(endpoint), _) => Self::new(Url::parse(endpoint.trim())?),
            (None, Some(region)) => Self::for_region(&region)?,
            (None, None) => return Err(ConfigError::missing_field(ENV_ENDPOINT)),
        };

        if let Some(raw) = set(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| {
                    ConfigError::invalid_value(ENV_TIMEOUT_SECS, raw.as_str(), e.to_string())
                })?;
            if secs == 0 {
                return Err(ConfigError::invalid_value(ENV_TIMEOUT_SECS, raw, "must be positive"));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Adds a header sent with every request.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidHeader {
            name: name.as_ref().to_string(),
            reason,
        };
        let header_name = HeaderName::try_from(name.as_ref()).map_err(|e| invalid(e.to_string()))?;
        let header_value = HeaderValue::try_from(value.as_ref()).map_err(|e| invalid(e.to_string()))?;
        self.default_headers.insert(header_name, header_value);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new(Url::parse("http://localhost:8080").unwrap());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("coreapi-rust/"));
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn test_for_region() {
        let config = ClientConfig::for_region("eu-frankfurt-1").unwrap();
        assert_eq!(
            config.endpoint.as_str(),
            "https://iaas.eu-frankfurt-1.oraclecloud.com/20160918"
        );
        assert!(ClientConfig::for_region("  ").is_err());
    }

    #[test]
    fn test_env_endpoint_wins() {
        let config = ClientConfig::from_env_with(env(&[
            (ENV_ENDPOINT, "http://127.0.0.1:9000/20160918"),
            (ENV_REGION, "us-phoenix-1"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint.as_str(), "http://127.0.0.1:9000/20160918");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_env_region() {
        let config = ClientConfig::from_env_with(env(&[(ENV_REGION, "us-phoenix-1")])).unwrap();
        assert_eq!(config.endpoint.host_str(), Some("iaas.us-phoenix-1.oraclecloud.com"));
    }

    #[test]
    fn test_env_missing() {
        let err = ClientConfig::from_env_with(env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field: ENV_ENDPOINT }));
    }

    #[test]
    fn test_env_bad_timeout() {
        let err = ClientConfig::from_env_with(env(&[(ENV_REGION, "r"), (ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: ENV_TIMEOUT_SECS, .. }));

        let err = ClientConfig::from_env_with(env(&[(ENV_REGION, "r"), (ENV_TIMEOUT_SECS, "0")]))
            .unwrap_err();
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_invalid_default_header() {
        let err = ClientConfig::for_region("r")
            .unwrap()
            .default_header("bad header", "v")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHeader { .. }));
    }
}
