//! Dynamic values flowing through the codec, validator and binders.
//!
//! A [`Value`] is the in-memory form of anything the Core Services API sends
//! or receives. Records are keyed by *logical* field name (see
//! [`FieldDescriptor::name`](coreapi_define::FieldDescriptor)); wire names only
//! appear once a value is encoded.
//!
//! ## Examples
//!
//! ```
//! use coreapi::{Record, Value};
//!
//! let request = Record::new("ListInstancesRequest")
//!     .with("compartmentId", "ocid1.compartment.oc1..aaaa")
//!     .with("lifecycleState", "running")
//!     .with("limit", 50);
//!
//! assert_eq!(request.get("limit").and_then(Value::as_i64), Some(50));
//! assert!(request.get("page").is_none());
//! ```

use chrono::{DateTime, Utc};
use serde_json::Map;

static NULL: Value = Value::Null;

/// A dynamically typed API value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent or JSON `null`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer; the declared width is checked at encode time.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// UTC timestamp.
    Timestamp(DateTime<Utc>),
    /// Enum value, recognized or not.
    Enum(EnumValue),
    /// Ordered sequence.
    Sequence(Vec<Value>),
    /// String-keyed mapping in insertion order.
    Mapping(Vec<(String, Value)>),
    /// A described record.
    Record(Record),
    /// A polymorphic value whose variant this build does not know.
    Unrecognized(UnrecognizedVariant),
    /// Free-form JSON kept verbatim.
    Opaque(serde_json::Value),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrows string-like content: strings and enum values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Enum(e) => Some(&e.value),
            _ => None,
        }
    }

    /// Returns the boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns a float; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the timestamp, if this is one.
    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the enum value, if this is one.
    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the record, if this is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the sequence items, if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the unrecognized sentinel, if this is one.
    pub fn as_unrecognized(&self) -> Option<&UnrecognizedVariant> {
        match self {
            Self::Unrecognized(u) => Some(u),
            _ => None,
        }
    }

    /// Looks up an entry of a mapping by key.
    pub fn entry(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Mapping(entries) => entries.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Short name of the value's shape, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Timestamp(_) => "timestamp",
            Self::Enum(_) => "enum",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Record(_) => "record",
            Self::Unrecognized(_) => "unrecognized variant",
            Self::Opaque(_) => "json",
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl From<UnrecognizedVariant> for Value {
    fn from(value: UnrecognizedVariant) -> Self {
        Self::Unrecognized(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

/// An enum value as decoded from the wire.
///
/// Unrecognized values keep their raw spelling so they can be forwarded
/// unchanged; the validator reports them when asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Name of the enum the value belongs to.
    pub enum_name: String,
    /// Canonical spelling when recognized, raw spelling otherwise.
    pub value: String,
    /// Whether the value is a member of the enum.
    pub recognized: bool,
}

impl EnumValue {
    /// A recognized value in canonical spelling.
    pub fn known(enum_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            enum_name: enum_name.into(),
            value: value.into(),
            recognized: true,
        }
    }

    /// A value this build does not recognize.
    pub fn unknown(enum_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            enum_name: enum_name.into(),
            value: value.into(),
            recognized: false,
        }
    }
}

/// Sentinel for a polymorphic value whose discriminator is missing or not in
/// the variant table.
///
/// The raw JSON subtree is kept so that re-encoding reproduces it exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct UnrecognizedVariant {
    /// Polymorphic base the value was decoded against.
    pub base: String,
    /// Wire name of the discriminator field.
    pub discriminator: String,
    /// Observed discriminator value; `None` when the field was missing.
    pub tag: Option<String>,
    /// The original JSON object.
    pub raw: serde_json::Value,
}

impl UnrecognizedVariant {
    /// Looks up a field of the raw object.
    pub fn raw_field(&self, wire_name: &str) -> Option<&serde_json::Value> {
        self.raw.get(wire_name)
    }
}

/// A record value: fields keyed by logical name plus server-added extras.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    name: String,
    tag: Option<String>,
    fields: Vec<(String, Value)>,
    extra: Map<String, serde_json::Value>,
    warnings: Vec<String>,
}

impl Record {
    /// Creates an empty record of the named type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Record type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variant tag observed on decode or declared by the descriptor.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Sets the variant tag.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = Some(tag.into());
    }

    /// Returns a field by logical name. Explicit nulls read as absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .filter(|v| !v.is_null())
    }

    /// Returns a field or [`Value::Null`] when absent.
    pub fn get_or_null(&self, name: &str) -> &Value {
        self.get(name).unwrap_or(&NULL)
    }

    /// Returns a string field.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns `true` if the field is set to a non-null value.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sets a field, replacing any previous value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Builder form of [`Record::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Removes a field, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(index).1)
    }

    /// Iterates over set fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Fields present on the wire but not described by the schema.
    pub fn extra(&self) -> &Map<String, serde_json::Value> {
        &self.extra
    }

    /// Mutable access to the extra bag.
    pub fn extra_mut(&mut self) -> &mut Map<String, serde_json::Value> {
        &mut self.extra
    }

    /// Non-fatal decode warnings (duplicate keys and the like).
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub(crate) fn push_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}
