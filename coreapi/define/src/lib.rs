//! Core Services Schema Definition Library
//!
//! This crate provides the descriptor primitives the `coreapi` runtime reads
//! to marshal requests and responses. Concrete Core Services definitions live
//! in the separate `coreapi-definitions` crate.
//!
//! ## Core Types
//!
//! ### Schema Registry
//!
//! - [`SchemaRegistry`] - Frozen table of records, enums and operations
//! - [`SchemaRegistryBuilder`] - Collects descriptors and validates them as a whole
//! - [`VariantResolution`] - Outcome of dispatching a discriminator value
//!
//! ### Descriptors
//!
//! - [`RecordDescriptor`] - Ordered fields plus optional polymorphism metadata
//! - [`FieldDescriptor`] - Wire name, optionality, [`Location`] and [`ValueKind`]
//! - [`Polymorphism`] / [`VariantOf`] - Variant tables and back references
//! - [`EnumDescriptor`] / [`EnumRegistry`] - Canonical enum values
//! - [`Operation`] / [`RestMethod`] - Callable operations
//!
//! ## Examples
//!
//! ```
//! use coreapi_define::{
//!     EnumDescriptor, FieldDescriptor, Operation, RecordDescriptor, RestMethod,
//!     SchemaRegistry, ValueKind,
//! };
//!
//! let mut builder = SchemaRegistry::builder();
//! builder
//!     .enumeration(EnumDescriptor::new("VolumeLifecycleState", ["PROVISIONING", "AVAILABLE"]))
//!     .record(
//!         RecordDescriptor::new("Volume")
//!             .field(FieldDescriptor::body("id", ValueKind::string()).required())
//!             .field(FieldDescriptor::body(
//!                 "lifecycleState",
//!                 ValueKind::enumeration("VolumeLifecycleState"),
//!             )),
//!     )
//!     .record(
//!         RecordDescriptor::new("GetVolumeRequest")
//!             .field(FieldDescriptor::path("volumeId", ValueKind::string())),
//!     )
//!     .record(
//!         RecordDescriptor::new("GetVolumeResponse")
//!             .field(FieldDescriptor::body("volume", ValueKind::record("Volume")).required()),
//!     )
//!     .operation(Operation::new(
//!         "GetVolume",
//!         RestMethod::Get,
//!         "/volumes/{volumeId}",
//!         "GetVolumeRequest",
//!         "GetVolumeResponse",
//!     ));
//!
//! let registry = builder.build().unwrap();
//! assert_eq!(registry.operation("GetVolume").unwrap().path_params(), vec!["volumeId"]);
//! ```

pub mod enums;
pub mod error;
pub mod field;
pub mod prelude;
pub mod record;
pub mod registry;
pub mod types;
mod validation;

// Re-export main types at crate root
pub use enums::{EnumDescriptor, EnumRegistry};
pub use error::SchemaError;
pub use field::{FieldDescriptor, FloatWidth, IntWidth, Location, ScalarKind, ValueKind};
pub use record::{Polymorphism, RecordDescriptor, VariantOf};
pub use registry::{SchemaRegistry, SchemaRegistryBuilder, VariantResolution};
pub use types::{Operation, RestMethod};
