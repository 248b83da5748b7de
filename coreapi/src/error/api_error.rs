//! Top-level API error type.

use coreapi_define::SchemaError;
use thiserror::Error;

use super::{AuthError, BindError, ClientError, CodecError, ConfigError, RemoteError};
use crate::validate::ErrorReport;

/// Top-level error type for a Core Services call.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error types when needed.
///
/// ## Examples
///
/// ```rust,ignore
/// use coreapi::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::Bind(e) => eprintln!("Request rejected: {e}"),
///         ApiError::Remote(e) => eprintln!("Service error: {e}"),
///         ApiError::Client(e) => eprintln!("Network error: {e}"),
///         other => eprintln!("{other}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport errors (network, timeout, cancellation).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Request binding errors, including validation reports.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// Response decoding errors.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The service answered with a non-2xx status.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Schema lookups (unknown operation or record).
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Request signing errors.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Client configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Returns `true` if retrying the call could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Client(e) => e.is_retryable(),
            Self::Remote(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Returns `true` if the caller cancelled the call.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_cancelled())
    }

    /// Returns the HTTP status code, if the call got that far.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Remote(e) => Some(e.status),
            Self::Client(e) => e.status_code(),
            _ => None,
        }
    }

    /// Returns the validation report when the request was rejected before sending.
    pub fn report(&self) -> Option<&ErrorReport> {
        match self {
            Self::Bind(e) => e.report(),
            _ => None,
        }
    }

    /// Returns the remote error, if this is one.
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(e) => Some(e),
            _ => None,
        }
    }
}
