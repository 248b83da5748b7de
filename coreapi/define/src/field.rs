//! Field descriptors.
//!
//! A [`FieldDescriptor`] answers three questions about one logical field of a
//! record: what is it called on the wire, where does it travel (body, path,
//! query or header), and what kind of value does it hold.
//!
//! ## Examples
//!
//! ```
//! use coreapi_define::{FieldDescriptor, Location, ValueKind};
//!
//! let compartment = FieldDescriptor::query("compartmentId", ValueKind::string()).required();
//! assert!(compartment.required);
//! assert_eq!(compartment.location, Location::Query);
//!
//! let request_id = FieldDescriptor::header("opc-request-id", ValueKind::string())
//!     .named("opcRequestId");
//! assert_eq!(request_id.name, "opcRequestId");
//! assert_eq!(request_id.wire_name, "opc-request-id");
//! ```

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Where a field travels on the HTTP wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Location {
    /// Part of the JSON request or response body.
    Body,
    /// Substituted into a `{placeholder}` of the path template.
    Path,
    /// Appended to the query string.
    Query,
    /// Sent or received as an HTTP header.
    Header,
}

/// Width of an integer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
}

impl IntWidth {
    /// Returns `true` if `value` fits in this width.
    pub fn contains(self, value: i64) -> bool {
        match self {
            Self::I32 => i32::try_from(value).is_ok(),
            Self::I64 => true,
        }
    }

    /// Converts an integral float that fits this width; `None` for fractions,
    /// non-finite values and anything out of range.
    pub fn from_f64(self, value: f64) -> Option<i64> {
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
        if value.fract() != 0.0 || !in_range {
            return None;
        }
        Some(value as i64).filter(|i| self.contains(*i))
    }
}

/// Width of a floating-point slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
}

/// Scalar value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// UTF-8 string.
    String,
    /// Boolean.
    Boolean,
    /// Sized integer.
    Integer(IntWidth),
    /// Sized floating-point number.
    Float(FloatWidth),
    /// RFC3339 timestamp.
    Timestamp,
}

impl ScalarKind {
    /// Short name used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer(IntWidth::I32) => "int32",
            Self::Integer(IntWidth::I64) => "int64",
            Self::Float(FloatWidth::F32) => "float32",
            Self::Float(FloatWidth::F64) => "float64",
            Self::Timestamp => "timestamp",
        }
    }
}

/// The kind of value a field holds.
///
/// Record, enum and polymorphic kinds refer to other descriptors by name; the
/// registry checks that every such reference resolves when it is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A scalar.
    Scalar(ScalarKind),
    /// A value of the named enum.
    Enum(String),
    /// A nested record of the named type.
    Record(String),
    /// A polymorphic value dispatched through the named base record.
    Polymorphic(String),
    /// An ordered sequence.
    SequenceOf(Box<ValueKind>),
    /// A string-keyed mapping.
    MappingOf(Box<ValueKind>),
    /// Free-form JSON kept verbatim (defined tags, extended metadata).
    Opaque,
}

impl ValueKind {
    /// String scalar.
    pub fn string() -> Self {
        Self::Scalar(ScalarKind::String)
    }

    /// Boolean scalar.
    pub fn boolean() -> Self {
        Self::Scalar(ScalarKind::Boolean)
    }

    /// 32-bit integer scalar.
    pub fn int32() -> Self {
        Self::Scalar(ScalarKind::Integer(IntWidth::I32))
    }

    /// 64-bit integer scalar.
    pub fn int64() -> Self {
        Self::Scalar(ScalarKind::Integer(IntWidth::I64))
    }

    /// 32-bit float scalar.
    pub fn float32() -> Self {
        Self::Scalar(ScalarKind::Float(FloatWidth::F32))
    }

    /// 64-bit float scalar.
    pub fn float64() -> Self {
        Self::Scalar(ScalarKind::Float(FloatWidth::F64))
    }

    /// Timestamp scalar.
    pub fn timestamp() -> Self {
        Self::Scalar(ScalarKind::Timestamp)
    }

    /// Enum of the given name.
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    /// Nested record of the given name.
    pub fn record(name: impl Into<String>) -> Self {
        Self::Record(name.into())
    }

    /// Polymorphic value rooted at the given base record.
    pub fn polymorphic(base: impl Into<String>) -> Self {
        Self::Polymorphic(base.into())
    }

    /// Sequence of `item`.
    pub fn sequence_of(item: ValueKind) -> Self {
        Self::SequenceOf(Box::new(item))
    }

    /// Mapping from string keys to `item`.
    pub fn mapping_of(item: ValueKind) -> Self {
        Self::MappingOf(Box::new(item))
    }

    /// `map<string, string>`, the shape of free-form tags.
    pub fn string_map() -> Self {
        Self::mapping_of(Self::string())
    }

    /// `map<string, map<string, opaque>>`, the shape of defined tags.
    pub fn defined_tags() -> Self {
        Self::mapping_of(Self::mapping_of(Self::Opaque))
    }

    /// Short human-readable description used in diagnostics.
    ///
    /// ## Examples
    ///
    /// ```
    /// use coreapi_define::ValueKind;
    ///
    /// let kind = ValueKind::sequence_of(ValueKind::record("Instance"));
    /// assert_eq!(kind.describe(), "sequence<Instance>");
    /// ```
    pub fn describe(&self) -> String {
        match self {
            Self::Scalar(scalar) => scalar.label().to_string(),
            Self::Enum(name) => format!("enum {name}"),
            Self::Record(name) | Self::Polymorphic(name) => name.clone(),
            Self::SequenceOf(item) => format!("sequence<{}>", item.describe()),
            Self::MappingOf(item) => format!("map<string, {}>", item.describe()),
            Self::Opaque => "json".to_string(),
        }
    }
}

/// Describes one field of a record.
///
/// Fields default to optional, body-located and omit-empty. The `name` is the
/// logical accessor name; `wire_name` is the JSON key, query parameter, path
/// placeholder or header name. They differ mostly for headers
/// (`opc-next-page` is read back as `nextPage`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Logical name used to read and write the field on a record value.
    pub name: String,
    /// Name of the field on the wire.
    pub wire_name: String,
    /// Whether the field must be present.
    pub required: bool,
    /// Where the field travels.
    pub location: Location,
    /// Whether an absent or empty value is left off the wire entirely.
    pub omit_empty: bool,
    /// Kind of value held by the field.
    pub kind: ValueKind,
    /// Human-readable description.
    pub description: Option<String>,
}

impl FieldDescriptor {
    /// Creates an optional field at the given location.
    pub fn new(wire_name: impl Into<String>, location: Location, kind: ValueKind) -> Self {
        let wire_name = wire_name.into();
        Self {
            name: wire_name.clone(),
            wire_name,
            required: false,
            location,
            omit_empty: true,
            kind,
            description: None,
        }
    }

    /// Creates an optional body field.
    pub fn body(wire_name: impl Into<String>, kind: ValueKind) -> Self {
        Self::new(wire_name, Location::Body, kind)
    }

    /// Creates a path field. Path fields are always mandatory.
    pub fn path(wire_name: impl Into<String>, kind: ValueKind) -> Self {
        Self::new(wire_name, Location::Path, kind).required()
    }

    /// Creates an optional query field.
    pub fn query(wire_name: impl Into<String>, kind: ValueKind) -> Self {
        Self::new(wire_name, Location::Query, kind)
    }

    /// Creates an optional header field.
    pub fn header(wire_name: impl Into<String>, kind: ValueKind) -> Self {
        Self::new(wire_name, Location::Header, kind)
    }

    /// Marks the field mandatory.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Emits the field even when it is empty.
    pub fn keep_empty(mut self) -> Self {
        self.omit_empty = false;
        self
    }

    /// Overrides the logical name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let field = FieldDescriptor::body("displayName", ValueKind::string());
        assert_eq!(field.name, "displayName");
        assert!(!field.required);
        assert!(field.omit_empty);
        assert_eq!(field.location, Location::Body);
    }

    #[test]
    fn test_path_fields_are_required() {
        let field = FieldDescriptor::path("instanceId", ValueKind::string());
        assert!(field.required);
        assert_eq!(field.location, Location::Path);
    }

    #[test]
    fn test_keep_empty() {
        let field = FieldDescriptor::body("items", ValueKind::sequence_of(ValueKind::string()))
            .keep_empty();
        assert!(!field.omit_empty);
    }

    #[test]
    fn test_location_display_and_parse() {
        assert_eq!(Location::Header.to_string(), "header");
        assert_eq!("query".parse::<Location>().unwrap(), Location::Query);
    }

    #[test]
    fn test_int_width_contains() {
        assert!(IntWidth::I32.contains(i64::from(i32::MAX)));
        assert!(!IntWidth::I32.contains(i64::from(i32::MAX) + 1));
        assert!(IntWidth::I64.contains(i64::MIN));
    }

    #[test]
    fn test_int_width_from_f64() {
        assert_eq!(IntWidth::I32.from_f64(2.0), Some(2));
        assert_eq!(IntWidth::I32.from_f64(2.5), None);
        assert_eq!(IntWidth::I32.from_f64(f64::from(i32::MAX) + 1.0), None);
        assert_eq!(IntWidth::I64.from_f64(-9_007_199_254_740_992.0), Some(-9_007_199_254_740_992));
        assert_eq!(IntWidth::I64.from_f64(1e300), None);
        assert_eq!(IntWidth::I64.from_f64(9_223_372_036_854_775_808.0), None);
        assert_eq!(IntWidth::I64.from_f64(f64::NAN), None);
        assert_eq!(IntWidth::I64.from_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_describe_nested() {
        assert_eq!(ValueKind::defined_tags().describe(), "map<string, map<string, json>>");
        assert_eq!(ValueKind::enumeration("SortOrder").describe(), "enum SortOrder");
    }
}
