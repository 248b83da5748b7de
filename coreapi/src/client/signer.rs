//! Request signing.
//!
//! Signing runs after binding and before execution, so a signer sees the
//! final URL, headers and body.

use reqwest::header::{HeaderName, HeaderValue};

use crate::error::AuthError;
use crate::request::HttpRequest;

/// Adds credentials to a bound request.
pub trait RequestSigner: Send + Sync {
    /// Signs `request` in place.
    ///
    /// ## Errors
    ///
    /// Returns an [`AuthError`] when credentials are missing or unusable.
    fn sign(&self, request: &mut HttpRequest) -> Result<(), AuthError>;
}

/// Leaves requests untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSigner;

impl RequestSigner for NoSigner {
    fn sign(&self, _request: &mut HttpRequest) -> Result<(), AuthError> {
        Ok(())
    }
}

/// Sets one fixed header, typically `Authorization`.
#[derive(Debug, Clone)]
pub struct HeaderSigner {
    name: HeaderName,
    value: HeaderValue,
}

impl HeaderSigner {
    /// Creates a signer for an arbitrary header. The value is marked
    /// sensitive so it is redacted from debug output.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::InvalidHeader`] if the name or value is invalid.
    pub fn new(name: &str, value: &str) -> Result<Self, AuthError> {
        let invalid = || AuthError::InvalidHeader {
            name: name.to_string(),
        };
        let header_name = HeaderName::try_from(name).map_err(|_| invalid())?;
        let mut header_value = HeaderValue::try_from(value).map_err(|_| invalid())?;
        header_value.set_sensitive(true);
        Ok(Self {
            name: header_name,
            value: header_value,
        })
    }

    /// `Authorization: Bearer {token}`.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] for an empty token.
    pub fn bearer(token: &str) -> Result<Self, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::MissingCredentials {
                what: "bearer token".to_string(),
            });
        }
        Self::new("authorization", &format!("Bearer {token}"))
    }
}

impl RequestSigner for HeaderSigner {
    fn sign(&self, request: &mut HttpRequest) -> Result<(), AuthError> {
        request.headers.insert(self.name.clone(), self.value.clone());
        Ok(())
    }
}
