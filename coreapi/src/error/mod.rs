//! Layered error types for the runtime.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`ApiError`] - Top-level error type for a call
//! - [`ClientError`] - Transport, timeout and cancellation errors
//! - [`CodecError`] - Structural encode/decode failures with a wire path
//! - [`BindError`] - Request binding failures, including validation reports
//! - [`RemoteError`] - Non-2xx responses with the decoded error body
//! - [`AuthError`] - Request signing errors
//! - [`ConfigError`] - Client configuration errors
//!
//! Schema lookups fail with [`SchemaError`](coreapi_define::SchemaError),
//! which lives next to the registry.

mod api_error;
mod auth_error;
mod bind_error;
mod client_error;
mod codec_error;
mod config_error;
mod remote_error;

pub use api_error::ApiError;
pub use auth_error::AuthError;
pub use bind_error::BindError;
pub use client_error::ClientError;
pub use codec_error::CodecError;
pub use config_error::ConfigError;
pub use remote_error::RemoteError;
