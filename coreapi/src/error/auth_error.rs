//! Request signing errors.

use thiserror::Error;

/// Errors raised by a [`RequestSigner`](crate::client::RequestSigner).
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credentials needed to sign the request are not available.
    #[error("Missing credentials: {what}")]
    MissingCredentials {
        /// What was missing (key id, token, ...).
        what: String,
    },

    /// A credential could not be expressed as an HTTP header.
    #[error("Invalid credential header '{name}'")]
    InvalidHeader {
        /// Header name.
        name: String,
    },

    /// The signer failed for another reason.
    #[error("Signing failed: {message}")]
    SigningFailed {
        /// Description from the signer.
        message: String,
    },
}

impl AuthError {
    /// Returns `true` if fresh credentials could resolve the error.
    pub fn is_refreshable(&self) -> bool {
        matches!(self, Self::MissingCredentials { .. } | Self::SigningFailed { .. })
    }
}
