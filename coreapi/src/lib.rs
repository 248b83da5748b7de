//! Schema-driven marshalling for the Core Services API.
//!
//! The `coreapi` crate turns the descriptor tables from `coreapi-define`
//! into working request and response handling. Requests and responses are
//! dynamic [`Value`] trees checked against a [`SchemaRegistry`], so adding an
//! operation means adding a table entry, not a type.
//!
//! ## Features
//!
//! - **Forward-compatible codec**: unknown enum values, unknown polymorphic
//!   variants and undescribed fields survive a decode/encode round trip
//! - **Complete validation**: every violation is reported, each with a wire path
//! - **Request binding**: path, query, header and body slots from one record
//! - **Response binding**: status, headers and body folded into one envelope
//! - **Async client**: pluggable executor and signer, with cancellation
//!
//! ## Example
//!
//! ```
//! use coreapi::{Codec, Record, Validator, Value};
//! use coreapi_define::{FieldDescriptor, RecordDescriptor, SchemaRegistry, ValueKind};
//!
//! let mut builder = SchemaRegistry::builder();
//! builder.record(
//!     RecordDescriptor::new("Shelf")
//!         .field(FieldDescriptor::body("id", ValueKind::string()).required())
//!         .field(FieldDescriptor::body("capacity", ValueKind::int32())),
//! );
//! let registry = builder.build().unwrap();
//!
//! let shelf: Value = Record::new("Shelf").with("capacity", 12).into();
//! let report = Validator::new(&registry).validate(&shelf).unwrap_err();
//! assert_eq!(report.violations()[0].path.to_string(), "id");
//!
//! let json = Codec::new(&registry).encode(&shelf, &ValueKind::record("Shelf")).unwrap();
//! assert_eq!(json.to_string(), r#"{"id":null,"capacity":12}"#);
//! ```
//!
//! [`SchemaRegistry`]: coreapi_define::SchemaRegistry

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod path;
pub mod request;
pub mod response;
pub mod validate;
pub mod value;

// Re-exports for convenience
pub use client::{
    cancel_pair, CallOptions, CancelHandle, CancelToken, CoreClient, HeaderSigner, HttpExecutor, NoSigner,
    ReqwestExecutor, RequestSigner,
};
pub use codec::{Codec, Decoded, EncodeOptions, Node};
pub use config::ClientConfig;
pub use error::{ApiError, AuthError, BindError, ClientError, CodecError, ConfigError, RemoteError};
pub use path::{FieldPath, Segment};
pub use request::{HttpRequest, RequestBinder, RetryMetadata};
pub use response::{BoundResponse, RawResponse, ResponseBinder};
pub use validate::{ErrorReport, Validator, Violation, ViolationKind};
pub use value::{EnumValue, Record, UnrecognizedVariant, Value};
