//! Record validation.
//!
//! The [`Validator`] walks a value against its schema and gathers every
//! violation before returning. Rules at each node, in order:
//!
//! 1. a mandatory field that is absent is `missing-mandatory`
//! 2. a non-empty enum value outside its enum is `unknown-enum`, listing the
//!    accepted values
//! 3. an unrecognized polymorphic variant is `polymorphic-unresolved`
//! 4. sequences and mappings recurse with `[i]` and `["key"]` path steps
//!
//! Values whose shape disagrees with the declared kind are `type-mismatch`.
//!
//! ## Examples
//!
//! ```
//! use coreapi::{Record, Validator, ViolationKind};
//! use coreapi_define::{EnumDescriptor, FieldDescriptor, RecordDescriptor, SchemaRegistry, ValueKind};
//!
//! let mut builder = SchemaRegistry::builder();
//! builder
//!     .enumeration(EnumDescriptor::new("IkeVersion", ["V1", "V2"]))
//!     .record(
//!         RecordDescriptor::new("Tunnel")
//!             .field(FieldDescriptor::body("id", ValueKind::string()).required())
//!             .field(FieldDescriptor::body("ikeVersion", ValueKind::enumeration("IkeVersion"))),
//!     );
//! let registry = builder.build().unwrap();
//!
//! let tunnel = Record::new("Tunnel").with("ikeVersion", "v3");
//! let report = Validator::new(&registry).validate(&tunnel.into()).unwrap_err();
//! assert_eq!(report.len(), 2);
//! assert_eq!(report.violations()[0].kind, ViolationKind::MissingMandatory);
//! ```

use std::fmt;

use chrono::DateTime;
use coreapi_define::{
    FloatWidth, RecordDescriptor, ScalarKind, SchemaError, SchemaRegistry, ValueKind,
};

use crate::path::FieldPath;
use crate::value::{Record, Value};

/// What went wrong at one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A mandatory field is absent.
    MissingMandatory,
    /// An enum value is not a member of its enum.
    UnknownEnum {
        /// The enum name.
        enum_name: String,
        /// The rejected value.
        value: String,
        /// Accepted canonical values in documented order.
        accepted: Vec<String>,
    },
    /// A value's shape disagrees with its declared kind.
    TypeMismatch {
        /// Declared kind.
        expected: String,
        /// Observed shape.
        found: String,
    },
    /// A polymorphic value's variant is unknown or its discriminator is missing.
    PolymorphicUnresolved {
        /// Polymorphic base record.
        base: String,
        /// Observed discriminator value, `None` when missing.
        tag: Option<String>,
    },
}

impl ViolationKind {
    /// Short machine-friendly label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingMandatory => "missing-mandatory",
            Self::UnknownEnum { .. } => "unknown-enum",
            Self::TypeMismatch { .. } => "type-mismatch",
            Self::PolymorphicUnresolved { .. } => "polymorphic-unresolved",
        }
    }
}

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Wire path of the offending value.
    pub path: FieldPath,
    /// What went wrong.
    pub kind: ViolationKind,
}

impl Violation {
    /// Creates a violation.
    pub fn new(path: FieldPath, kind: ViolationKind) -> Self {
        Self { path, kind }
    }

    /// Accepted values for enum violations; empty otherwise.
    pub fn accepted(&self) -> &[String] {
        match &self.kind {
            ViolationKind::UnknownEnum { accepted, .. } => accepted,
            _ => &[],
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::MissingMandatory => {
                write!(f, "{}: mandatory field is missing", self.path)
            }
            ViolationKind::UnknownEnum {
                enum_name,
                value,
                accepted,
            } => write!(
                f,
                "{}: '{value}' is not a valid {enum_name}; accepted values: {}",
                self.path,
                accepted.join(", ")
            ),
            ViolationKind::TypeMismatch { expected, found } => {
                write!(f, "{}: expected {expected}, found {found}", self.path)
            }
            ViolationKind::PolymorphicUnresolved { base, tag: Some(tag) } => write!(
                f,
                "{}: '{tag}' is not a known variant of {base}",
                self.path
            ),
            ViolationKind::PolymorphicUnresolved { base, tag: None } => write!(
                f,
                "{}: {base} value has no discriminator",
                self.path
            ),
        }
    }
}

/// A non-empty, ordered list of violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    violations: Vec<Violation>,
}

impl ErrorReport {
    /// Wraps violations into a report; `None` when there are none.
    pub fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    /// Violations in discovery order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Number of violations; never zero.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Always `false`; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Finds the first violation at a rendered path.
    pub fn at(&self, path: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.path.to_string() == path)
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} violation(s)", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorReport {}

/// Walks values against the schema registry.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'r> {
    registry: &'r SchemaRegistry,
}

impl<'r> Validator<'r> {
    /// Creates a validator over `registry`.
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Validates a record or sentinel against its own descriptor.
    ///
    /// Other values carry no schema of their own and always pass.
    ///
    /// ## Errors
    ///
    /// Returns every violation found, in discovery order.
    pub fn validate(&self, value: &Value) -> Result<(), ErrorReport> {
        let mut violations = Vec::new();
        let root = FieldPath::root();
        match value {
            Value::Record(record) => match self.registry.lookup(record.name()) {
                Ok(descriptor) => self.check_record(descriptor, record, &root, &mut violations),
                Err(err) => violations.push(schema_violation(&root, &err)),
            },
            Value::Unrecognized(u) => violations.push(Violation::new(
                root,
                ViolationKind::PolymorphicUnresolved {
                    base: u.base.clone(),
                    tag: u.tag.clone(),
                },
            )),
            _ => {}
        }
        ErrorReport::from_violations(violations).map_or(Ok(()), Err)
    }

    /// Validates a value against an explicit kind.
    ///
    /// ## Errors
    ///
    /// Returns every violation found, in discovery order.
    pub fn validate_as(&self, value: &Value, kind: &ValueKind) -> Result<(), ErrorReport> {
        let mut violations = Vec::new();
        self.check_value(value, kind, &FieldPath::root(), &mut violations);
        ErrorReport::from_violations(violations).map_or(Ok(()), Err)
    }

    /// Collects violations of one record into `out`.
    pub fn collect_record(
        &self,
        descriptor: &RecordDescriptor,
        record: &Record,
        out: &mut Vec<Violation>,
    ) {
        self.check_record(descriptor, record, &FieldPath::root(), out);
    }

    fn check_record(
        &self,
        descriptor: &RecordDescriptor,
        record: &Record,
        path: &FieldPath,
        out: &mut Vec<Violation>,
    ) {
        for field in &descriptor.fields {
            let field_path = path.field(&field.wire_name);
            match record.get(&field.name) {
                Some(value) if !is_empty_enum(value, &field.kind) => {
                    self.check_value(value, &field.kind, &field_path, out);
                }
                _ if field.required => {
                    out.push(Violation::new(field_path, ViolationKind::MissingMandatory));
                }
                _ => {}
            }
        }
    }

    fn check_value(&self, value: &Value, kind: &ValueKind, path: &FieldPath, out: &mut Vec<Violation>) {
        if value.is_null() {
            return;
        }
        match kind {
            ValueKind::Scalar(scalar) => {
                if !scalar_matches(value, *scalar) {
                    out.push(mismatch(path, scalar.label(), value));
                }
            }
            ValueKind::Enum(enum_name) => self.check_enum(value, enum_name, path, out),
            ValueKind::Record(name) => match self.registry.lookup(name) {
                Ok(descriptor) if descriptor.is_polymorphic_base() => {
                    self.check_polymorphic(value, descriptor, path, out);
                }
                Ok(descriptor) => match value {
                    Value::Record(record) if record.name() == name => {
                        self.check_record(descriptor, record, path, out);
                    }
                    Value::Record(record) => out.push(mismatch(path, name.as_str(), record.name())),
                    other => out.push(mismatch(path, name.as_str(), other)),
                },
                Err(err) => out.push(schema_violation(path, &err)),
            },
            ValueKind::Polymorphic(base) => match self.registry.lookup(base) {
                Ok(descriptor) => self.check_polymorphic(value, descriptor, path, out),
                Err(err) => out.push(schema_violation(path, &err)),
            },
            ValueKind::SequenceOf(item) => match value {
                Value::Sequence(items) => {
                    for (i, element) in items.iter().enumerate() {
                        self.check_value(element, item, &path.index(i), out);
                    }
                }
                other => out.push(mismatch(path, kind.describe(), other)),
            },
            ValueKind::MappingOf(item) => match value {
                Value::Mapping(entries) => {
                    for (key, element) in entries {
                        self.check_value(element, item, &path.key(key), out);
                    }
                }
                Value::Opaque(serde_json::Value::Object(_)) => {}
                other => out.push(mismatch(path, kind.describe(), other)),
            },
            ValueKind::Opaque => {}
        }
    }

    fn check_enum(&self, value: &Value, enum_name: &str, path: &FieldPath, out: &mut Vec<Violation>) {
        let Some(raw) = value.as_str() else {
            out.push(mismatch(path, format!("enum {enum_name}"), value));
            return;
        };
        if raw.is_empty() {
            return;
        }
        match self.registry.enums().get(enum_name) {
            Ok(descriptor) if descriptor.contains(raw) => {}
            Ok(descriptor) => out.push(Violation::new(
                path.clone(),
                ViolationKind::UnknownEnum {
                    enum_name: enum_name.to_string(),
                    value: raw.to_string(),
                    accepted: descriptor.values().to_vec(),
                },
            )),
            Err(err) => out.push(schema_violation(path, &err)),
        }
    }

    fn check_polymorphic(
        &self,
        value: &Value,
        base: &RecordDescriptor,
        path: &FieldPath,
        out: &mut Vec<Violation>,
    ) {
        match value {
            Value::Unrecognized(u) => out.push(Violation::new(
                path.clone(),
                ViolationKind::PolymorphicUnresolved {
                    base: base.name.clone(),
                    tag: u.tag.clone(),
                },
            )),
            Value::Record(record) => match self.registry.lookup(record.name()) {
                Ok(descriptor) if belongs_to(descriptor, &base.name) => {
                    self.check_record(descriptor, record, path, out);
                }
                Ok(descriptor) => out.push(mismatch(
                    path,
                    format!("variant of {}", base.name),
                    descriptor.name.as_str(),
                )),
                Err(err) => out.push(schema_violation(path, &err)),
            },
            other => out.push(mismatch(path, base.name.as_str(), other)),
        }
    }
}

/// Returns `true` if `descriptor` is `base` itself or one of its variants.
pub(crate) fn belongs_to(descriptor: &RecordDescriptor, base: &str) -> bool {
    descriptor.name == base
        || descriptor
            .variant_of
            .as_ref()
            .is_some_and(|v| v.base == base)
}

/// Empty enum strings count as absent.
pub(crate) fn is_empty_enum(value: &Value, kind: &ValueKind) -> bool {
    matches!(kind, ValueKind::Enum(_)) && value.as_str().is_some_and(str::is_empty)
}

fn scalar_matches(value: &Value, scalar: ScalarKind) -> bool {
    match (scalar, value) {
        (ScalarKind::String, Value::String(_)) => true,
        (ScalarKind::Boolean, Value::Bool(_)) => true,
        (ScalarKind::Integer(width), Value::Integer(i)) => width.contains(*i),
        (ScalarKind::Integer(width), Value::Float(f)) => width.from_f64(*f).is_some(),
        (ScalarKind::Float(FloatWidth::F32), Value::Float(f)) => {
            !f.is_finite() || f.abs() <= f64::from(f32::MAX)
        }
        (ScalarKind::Float(_), Value::Float(_) | Value::Integer(_)) => true,
        (ScalarKind::Timestamp, Value::Timestamp(_)) => true,
        (ScalarKind::Timestamp, Value::String(s)) => DateTime::parse_from_rfc3339(s).is_ok(),
        _ => false,
    }
}

fn mismatch(path: &FieldPath, expected: impl Into<String>, found: impl Describe) -> Violation {
    Violation::new(
        path.clone(),
        ViolationKind::TypeMismatch {
            expected: expected.into(),
            found: found.describe(),
        },
    )
}

fn schema_violation(path: &FieldPath, err: &SchemaError) -> Violation {
    Violation::new(
        path.clone(),
        ViolationKind::TypeMismatch {
            expected: "a registered schema".to_string(),
            found: err.to_string(),
        },
    )
}

trait Describe {
    fn describe(self) -> String;
}

impl Describe for &Value {
    fn describe(self) -> String {
        self.kind_name().to_string()
    }
}

impl Describe for &str {
    fn describe(self) -> String {
        self.to_string()
    }
}
