//! Schema-driven JSON codec.
//!
//! [`Codec`] translates between [`Value`] trees and the wire. Bodies are
//! JSON; path, query and header slots use string coercion.
//!
//! Decoding is forward compatible. Unknown enum values are kept with
//! `recognized = false`, unknown polymorphic variants become
//! [`UnrecognizedVariant`](crate::UnrecognizedVariant) sentinels carrying the
//! raw subtree, and undescribed keys land in the record's extra bag. Missing
//! mandatory fields and missing discriminators are returned as deferred
//! [`Violation`]s in [`Decoded`] rather than errors.
//!
//! ## Examples
//!
//! ```
//! use coreapi::Codec;
//! use coreapi_define::{EnumDescriptor, FieldDescriptor, RecordDescriptor, SchemaRegistry, ValueKind};
//!
//! let mut builder = SchemaRegistry::builder();
//! builder
//!     .enumeration(EnumDescriptor::new("VolumeLifecycleState", ["AVAILABLE", "FAULTY"]))
//!     .record(
//!         RecordDescriptor::new("Volume")
//!             .field(FieldDescriptor::body("id", ValueKind::string()).required())
//!             .field(FieldDescriptor::body(
//!                 "lifecycleState",
//!                 ValueKind::enumeration("VolumeLifecycleState"),
//!             )),
//!     );
//! let registry = builder.build().unwrap();
//! let codec = Codec::new(&registry);
//!
//! let decoded = codec
//!     .decode(br#"{"id":"v1","lifecycleState":"available","sizeInTBs":2}"#, &ValueKind::record("Volume"))
//!     .unwrap();
//! let volume = decoded.value.as_record().unwrap();
//! assert_eq!(volume.get_str("lifecycleState"), Some("AVAILABLE"));
//! assert_eq!(volume.extra()["sizeInTBs"], 2);
//!
//! let json = codec.encode(&decoded.value, &ValueKind::record("Volume")).unwrap();
//! assert_eq!(json.to_string(), r#"{"id":"v1","lifecycleState":"AVAILABLE","sizeInTBs":2}"#);
//! ```

mod decode;
mod encode;
mod node;
mod scalar;

pub use node::Node;

use coreapi_define::{RecordDescriptor, SchemaRegistry, ValueKind};

use crate::error::CodecError;
use crate::path::FieldPath;
use crate::validate::Violation;
use crate::value::{Record, Value};

use decode::Decoder;
use encode::Encoder;

/// Encoding switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Emit mapping keys in lexicographic order instead of insertion order.
    pub sorted_keys: bool,
}

/// Result of a decode: the value plus everything deferred.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// The decoded value.
    pub value: Value,
    /// Missing mandatory fields and missing discriminators.
    pub violations: Vec<Violation>,
    /// Non-fatal notes such as duplicate keys.
    pub warnings: Vec<String>,
}

/// Encoder and decoder bound to one schema registry.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'r> {
    registry: &'r SchemaRegistry,
    options: EncodeOptions,
}

impl<'r> Codec<'r> {
    /// Creates a codec with default options.
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            options: EncodeOptions::default(),
        }
    }

    /// Replaces the encoding options.
    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    /// The registry this codec reads.
    pub fn registry(&self) -> &'r SchemaRegistry {
        self.registry
    }

    /// Decodes JSON bytes as `kind`.
    ///
    /// ## Errors
    ///
    /// Returns [`CodecError::MalformedJson`] for invalid JSON,
    /// [`CodecError::TypeMismatch`] or [`CodecError::TimestampParse`] with the
    /// offending path for structural failures, and [`CodecError::Schema`] when
    /// a referenced descriptor is missing.
    pub fn decode(&self, bytes: &[u8], kind: &ValueKind) -> Result<Decoded, CodecError> {
        let node = Node::parse(bytes)?;
        self.decode_value(&node, kind)
    }

    /// Decodes an already parsed tree as `kind`.
    ///
    /// ## Errors
    ///
    /// Same as [`Codec::decode`], minus malformed JSON.
    pub fn decode_value(&self, node: &Node, kind: &ValueKind) -> Result<Decoded, CodecError> {
        let mut decoder = Decoder::new(self.registry);
        let value = decoder.value(node, kind, &FieldPath::root(), None)?;
        Ok(Decoded {
            value,
            violations: decoder.violations,
            warnings: decoder.warnings,
        })
    }

    /// Decodes JSON bytes against an explicit descriptor, which need not be
    /// registered.
    ///
    /// ## Errors
    ///
    /// Same as [`Codec::decode`].
    pub fn decode_record(&self, bytes: &[u8], descriptor: &RecordDescriptor) -> Result<Decoded, CodecError> {
        let node = Node::parse(bytes)?;
        let mut decoder = Decoder::new(self.registry);
        let record = decoder.record(descriptor, &node, &FieldPath::root())?;
        Ok(Decoded {
            value: Value::Record(record),
            violations: decoder.violations,
            warnings: decoder.warnings,
        })
    }

    /// Encodes a value as `kind`.
    ///
    /// ## Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] when the value disagrees with
    /// `kind`, [`CodecError::MissingVariantTag`] for a polymorphic base
    /// without a default tag, and [`CodecError::Schema`] for missing
    /// descriptors.
    pub fn encode(&self, value: &Value, kind: &ValueKind) -> Result<serde_json::Value, CodecError> {
        Encoder::new(self.registry, self.options).value(value, kind, &FieldPath::root())
    }

    /// Encodes a record against its own descriptor.
    ///
    /// ## Errors
    ///
    /// Same as [`Codec::encode`].
    pub fn encode_record(&self, record: &Record) -> Result<serde_json::Value, CodecError> {
        let descriptor = self.registry.lookup(record.name())?;
        Encoder::new(self.registry, self.options).record(descriptor, record, &FieldPath::root())
    }

    /// Encodes a value as `kind` straight to bytes.
    ///
    /// ## Errors
    ///
    /// Same as [`Codec::encode`], plus [`CodecError::Serialize`].
    pub fn to_vec(&self, value: &Value, kind: &ValueKind) -> Result<Vec<u8>, CodecError> {
        let json = self.encode(value, kind)?;
        serde_json::to_vec(&json).map_err(CodecError::Serialize)
    }

    /// Renders a scalar or enum for a path, query or header slot. Absent
    /// values and empty enums yield `None`.
    ///
    /// ## Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] for structured kinds or values of
    /// the wrong shape.
    pub fn scalar_to_string(
        &self,
        value: &Value,
        kind: &ValueKind,
        path: &FieldPath,
    ) -> Result<Option<String>, CodecError> {
        scalar::to_string(self.registry, value, kind, path)
    }

    /// Parses a header value into the declared kind.
    ///
    /// ## Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] or [`CodecError::TimestampParse`]
    /// when `raw` does not parse as `kind`.
    pub fn scalar_from_str(&self, raw: &str, kind: &ValueKind, path: &FieldPath) -> Result<Value, CodecError> {
        scalar::from_str(self.registry, raw, kind, path)
    }
}
