//! JSON tree to [`Value`] decoding.

use chrono::{DateTime, Utc};
use coreapi_define::{
    FloatWidth, IntWidth, Location, RecordDescriptor, ScalarKind, SchemaError, SchemaRegistry,
    ValueKind, VariantResolution,
};
use serde_json::Number;
use tracing::{debug, trace};

use super::node::Node;
use crate::error::CodecError;
use crate::path::FieldPath;
use crate::validate::{Violation, ViolationKind};
use crate::value::{EnumValue, Record, UnrecognizedVariant, Value};

/// Decoding state for one document.
#[derive(Debug)]
pub(crate) struct Decoder<'r> {
    registry: &'r SchemaRegistry,
    pub(crate) violations: Vec<Violation>,
    pub(crate) warnings: Vec<String>,
    /// Discriminator keys read from the object currently being decoded on
    /// behalf of a nested polymorphic field.
    borrowed: Vec<String>,
}

impl<'r> Decoder<'r> {
    pub(crate) fn new(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            violations: Vec::new(),
            warnings: Vec::new(),
            borrowed: Vec::new(),
        }
    }

    /// Decodes `node` as `kind`. `parent` is the enclosing object, consulted
    /// for a discriminator the node itself lacks.
    pub(crate) fn value(
        &mut self,
        node: &Node,
        kind: &ValueKind,
        path: &FieldPath,
        parent: Option<&Node>,
    ) -> Result<Value, CodecError> {
        if matches!(node, Node::Null) {
            return Ok(Value::Null);
        }
        match kind {
            ValueKind::Scalar(scalar) => decode_scalar(node, *scalar, path),
            ValueKind::Enum(name) => self.enumeration(node, name, path),
            ValueKind::Record(name) => {
                let descriptor = self.registry.lookup(name)?;
                if descriptor.is_polymorphic_base() {
                    self.polymorphic(node, descriptor, path, parent)
                } else {
                    self.record(descriptor, node, path).map(Value::Record)
                }
            }
            ValueKind::Polymorphic(base) => {
                let descriptor = self.registry.lookup(base)?;
                self.polymorphic(node, descriptor, path, parent)
            }
            ValueKind::SequenceOf(item) => {
                let Node::Array(items) = node else {
                    return Err(CodecError::mismatch(path, kind.describe(), node.kind_name()));
                };
                let mut values = Vec::with_capacity(items.len());
                for (i, element) in items.iter().enumerate() {
                    values.push(self.value(element, item, &path.index(i), parent)?);
                }
                Ok(Value::Sequence(values))
            }
            ValueKind::MappingOf(item) => {
                let Node::Object(entries) = node else {
                    return Err(CodecError::mismatch(path, kind.describe(), node.kind_name()));
                };
                self.warn_duplicates(node, path, None);
                let mut values: Vec<(String, Value)> = Vec::with_capacity(entries.len());
                for (key, element) in entries {
                    let value = self.value(element, item, &path.key(key), None)?;
                    match values.iter_mut().find(|(k, _)| k == key) {
                        Some(slot) => slot.1 = value,
                        None => values.push((key.clone(), value)),
                    }
                }
                Ok(Value::Mapping(values))
            }
            ValueKind::Opaque => Ok(Value::Opaque(node.to_json())),
        }
    }

    /// Decodes an object against `descriptor`'s body fields.
    pub(crate) fn record(
        &mut self,
        descriptor: &RecordDescriptor,
        node: &Node,
        path: &FieldPath,
    ) -> Result<Record, CodecError> {
        let Node::Object(entries) = node else {
            return Err(CodecError::mismatch(path, descriptor.name.as_str(), node.kind_name()));
        };

        let mut record = Record::new(&descriptor.name);
        if let Some(variant) = &descriptor.variant_of {
            record.set_tag(&variant.tag);
        }
        self.warn_duplicates(node, path, Some(&mut record));

        let outer = std::mem::take(&mut self.borrowed);
        for field in descriptor.fields_at(Location::Body) {
            let field_path = path.field(&field.wire_name);
            let value = match node.get(&field.wire_name) {
                Some(child) => self.value(child, &field.kind, &field_path, Some(node))?,
                None => Value::Null,
            };
            if value.is_null() {
                if field.required {
                    self.violations
                        .push(Violation::new(field_path, ViolationKind::MissingMandatory));
                }
                continue;
            }
            record.set(&field.name, value);
        }
        let borrowed = std::mem::replace(&mut self.borrowed, outer);

        let discriminator = descriptor.discriminator();
        for (key, child) in entries {
            let described = descriptor
                .fields_at(Location::Body)
                .any(|f| f.wire_name == *key);
            if described || discriminator == Some(key.as_str()) || borrowed.contains(key) {
                continue;
            }
            record.extra_mut().insert(key.clone(), child.to_json());
        }

        Ok(record)
    }

    fn polymorphic(
        &mut self,
        node: &Node,
        base: &RecordDescriptor,
        path: &FieldPath,
        parent: Option<&Node>,
    ) -> Result<Value, CodecError> {
        let Some(table) = &base.polymorphism else {
            return Err(SchemaError::NotPolymorphic {
                name: base.name.clone(),
            }
            .into());
        };
        if !matches!(node, Node::Object(_)) {
            return Err(CodecError::mismatch(path, base.name.as_str(), node.kind_name()));
        }

        let discriminator = table.discriminator.as_str();
        let (tag_node, from_parent) = match node.get(discriminator) {
            Some(tag) => (Some(tag), false),
            None => (parent.and_then(|p| p.get(discriminator)), true),
        };

        let tag = match tag_node {
            Some(Node::String(tag)) => tag,
            None | Some(Node::Null) => {
                debug!(base = %base.name, path = %path, "polymorphic value has no discriminator");
                self.violations.push(Violation::new(
                    path.clone(),
                    ViolationKind::PolymorphicUnresolved {
                        base: base.name.clone(),
                        tag: None,
                    },
                ));
                return Ok(Value::Unrecognized(UnrecognizedVariant {
                    base: base.name.clone(),
                    discriminator: discriminator.to_string(),
                    tag: None,
                    raw: node.to_json(),
                }));
            }
            Some(other) => {
                return Err(CodecError::mismatch(
                    &path.field(discriminator),
                    "string",
                    other.kind_name(),
                ));
            }
        };

        match self.registry.resolve_variant(base, tag)? {
            VariantResolution::Known { record, .. } => {
                // The child re-emits the tag; an unrecognized child keeps it in the parent.
                if from_parent && !self.borrowed.iter().any(|k| k == discriminator) {
                    self.borrowed.push(discriminator.to_string());
                }
                self.record(record, node, path).map(Value::Record)
            }
            VariantResolution::Unrecognized => {
                debug!(
                    base = %base.name,
                    tag = %tag,
                    path = %path,
                    "unrecognized polymorphic variant; keeping raw subtree"
                );
                Ok(Value::Unrecognized(UnrecognizedVariant {
                    base: base.name.clone(),
                    discriminator: discriminator.to_string(),
                    tag: Some(tag.clone()),
                    raw: node.to_json(),
                }))
            }
        }
    }

    fn enumeration(&mut self, node: &Node, name: &str, path: &FieldPath) -> Result<Value, CodecError> {
        let Node::String(raw) = node else {
            return Err(CodecError::mismatch(path, format!("enum {name}"), node.kind_name()));
        };
        if raw.is_empty() {
            return Ok(Value::Null);
        }
        let descriptor = self.registry.enums().get(name)?;
        match descriptor.canonical(raw) {
            Some(canonical) => Ok(Value::Enum(EnumValue::known(name, canonical))),
            None => {
                trace!(enum_name = name, value = %raw, path = %path, "retaining unrecognized enum value");
                Ok(Value::Enum(EnumValue::unknown(name, raw.as_str())))
            }
        }
    }

    fn warn_duplicates(&mut self, node: &Node, path: &FieldPath, record: Option<&mut Record>) {
        let duplicates = node.duplicate_keys();
        if duplicates.is_empty() {
            return;
        }
        let mut messages = Vec::with_capacity(duplicates.len());
        for key in duplicates {
            let message = format!("{}: duplicate key, last value wins", path.field(key));
            trace!(path = %path, key = %key, "duplicate JSON key");
            messages.push(message);
        }
        if let Some(record) = record {
            for message in &messages {
                record.push_warning(message.clone());
            }
        }
        self.warnings.extend(messages);
    }
}

fn decode_scalar(node: &Node, kind: ScalarKind, path: &FieldPath) -> Result<Value, CodecError> {
    match (kind, node) {
        (ScalarKind::String, Node::String(s)) => Ok(Value::String(s.clone())),
        (ScalarKind::Boolean, Node::Bool(b)) => Ok(Value::Bool(*b)),
        (ScalarKind::Integer(width), Node::Number(n)) => integer(n, width, path),
        (ScalarKind::Float(width), Node::Number(n)) => float(n, width, path),
        (ScalarKind::Timestamp, Node::String(s)) => parse_timestamp(s, path).map(Value::Timestamp),
        (kind, node) => Err(CodecError::mismatch(path, kind.label(), node.kind_name())),
    }
}

fn integer(n: &Number, width: IntWidth, path: &FieldPath) -> Result<Value, CodecError> {
    let value = match n.as_i64() {
        Some(i) => Some(i),
        None if n.is_u64() => None,
        None => n.as_f64().and_then(|f| width.from_f64(f)),
    };
    match value {
        Some(i) if width.contains(i) => Ok(Value::Integer(i)),
        _ => Err(CodecError::mismatch(
            path,
            ScalarKind::Integer(width).label(),
            format!("number {n}"),
        )),
    }
}

fn float(n: &Number, width: FloatWidth, path: &FieldPath) -> Result<Value, CodecError> {
    match n.as_f64() {
        Some(f) if width == FloatWidth::F64 || f.abs() <= f64::from(f32::MAX) => Ok(Value::Float(f)),
        _ => Err(CodecError::mismatch(
            path,
            ScalarKind::Float(width).label(),
            format!("number {n}"),
        )),
    }
}

/// Strict RFC3339 parse, normalized to UTC.
pub(crate) fn parse_timestamp(raw: &str, path: &FieldPath) -> Result<DateTime<Utc>, CodecError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|source| CodecError::TimestampParse {
            path: path.clone(),
            value: raw.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::tests::fixture;
    use chrono::TimeZone;
    use serde_json::json;

    fn decode(text: &str, kind: &ValueKind) -> Result<(Value, Decoder<'static>), CodecError> {
        let registry: &'static SchemaRegistry = Box::leak(Box::new(fixture()));
        let mut decoder = Decoder::new(registry);
        let node = Node::parse(text.as_bytes())?;
        let value = decoder.value(&node, kind, &FieldPath::root(), None)?;
        Ok((value, decoder))
    }

    #[test]
    fn test_known_variant() {
        let (value, decoder) = decode(
            r#"{"type":"amd_milan_bm_gpu","isSecureBootEnabled":true,"numaNodesPerSocket":"nps2"}"#,
            &ValueKind::polymorphic("Config"),
        )
        .unwrap();
        let record = value.as_record().unwrap();
        assert_eq!(record.name(), "GpuConfig");
        assert_eq!(record.tag(), Some("AMD_MILAN_BM_GPU"));
        assert_eq!(record.get("isSecureBootEnabled"), Some(&Value::Bool(true)));
        assert_eq!(
            record.get("numaNodesPerSocket"),
            Some(&Value::Enum(EnumValue::known("NumaNodesPerSocket", "NPS2")))
        );
        assert!(record.extra().is_empty());
        assert!(decoder.violations.is_empty());
    }

    #[test]
    fn test_unknown_variant_keeps_raw() {
        let (value, decoder) = decode(
            r#"{"type":"FUTURE_CPU_BM","someNewField":123}"#,
            &ValueKind::polymorphic("Config"),
        )
        .unwrap();
        let sentinel = value.as_unrecognized().unwrap();
        assert_eq!(sentinel.tag.as_deref(), Some("FUTURE_CPU_BM"));
        assert_eq!(sentinel.raw_field("someNewField"), Some(&json!(123)));
        assert!(decoder.violations.is_empty());
    }

    #[test]
    fn test_missing_discriminator_is_deferred() {
        let (value, decoder) =
            decode(r#"{"isSecureBootEnabled":false}"#, &ValueKind::polymorphic("Config")).unwrap();
        assert!(value.as_unrecognized().unwrap().tag.is_none());
        assert_eq!(decoder.violations.len(), 1);
        assert_eq!(decoder.violations[0].kind.label(), "polymorphic-unresolved");
    }

    #[test]
    fn test_discriminator_in_enclosing_object() {
        let (value, _) = decode(
            r#"{"id":"i","type":"AMD_VM","platformConfig":{"isSecureBootEnabled":true}}"#,
            &ValueKind::record("Instance"),
        )
        .unwrap();
        let instance = value.as_record().unwrap();
        let config = instance.get("platformConfig").and_then(Value::as_record).unwrap();
        assert_eq!(config.name(), "AmdVmConfig");
        assert!(instance.extra().get("type").is_none());

        let registry = fixture();
        let json = crate::codec::Codec::new(&registry)
            .encode(&value, &ValueKind::record("Instance"))
            .unwrap();
        assert_eq!(
            json,
            json!({"id": "i", "platformConfig": {"type": "AMD_VM", "isSecureBootEnabled": true}})
        );
    }

    #[test]
    fn test_non_string_discriminator() {
        let err = decode(r#"{"type":7}"#, &ValueKind::polymorphic("Config")).unwrap_err();
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("type"));
    }

    #[test]
    fn test_extra_fields_and_missing_mandatory() {
        let (value, decoder) = decode(
            r#"{"ikeVersion":"V9","serverAdded":{"x":[1,2]}}"#,
            &ValueKind::record("Tunnel"),
        )
        .unwrap();
        let tunnel = value.as_record().unwrap();
        assert_eq!(tunnel.extra().get("serverAdded"), Some(&json!({"x": [1, 2]})));
        let ike = tunnel.get("ikeVersion").and_then(Value::as_enum).unwrap();
        assert!(!ike.recognized);
        assert_eq!(ike.value, "V9");
        assert_eq!(decoder.violations.len(), 1);
        assert_eq!(decoder.violations[0].path.to_string(), "id");
    }

    #[test]
    fn test_duplicate_keys_warn_and_last_wins() {
        let (value, decoder) =
            decode(r#"{"id":"a","id":"b"}"#, &ValueKind::record("Tunnel")).unwrap();
        let tunnel = value.as_record().unwrap();
        assert_eq!(tunnel.get_str("id"), Some("b"));
        assert_eq!(tunnel.warnings().len(), 1);
        assert_eq!(decoder.warnings, vec!["id: duplicate key, last value wins".to_string()]);
    }

    #[test]
    fn test_numbers() {
        let (value, _) = decode(
            r#"{"id":"a","dpdTimeoutInSec":20.0,"ocpus":2}"#,
            &ValueKind::record("Tunnel"),
        )
        .unwrap();
        let tunnel = value.as_record().unwrap();
        assert_eq!(tunnel.get("dpdTimeoutInSec"), Some(&Value::Integer(20)));
        assert_eq!(tunnel.get("ocpus"), Some(&Value::Float(2.0)));

        let err = decode(r#"{"id":"a","dpdTimeoutInSec":1.5}"#, &ValueKind::record("Tunnel"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Type mismatch at dpdTimeoutInSec: expected int32, found number 1.5"
        );

        let err = decode(
            r#"{"id":"a","dpdTimeoutInSec":4294967296}"#,
            &ValueKind::record("Tunnel"),
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));

        let err = decode(r#"{"id":"a","dpdTimeoutInSec":1e300}"#, &ValueKind::record("Tunnel"))
            .unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn test_timestamps() {
        let (value, _) = decode(
            r#"{"id":"a","timeCreated":"2024-03-01T10:15:30.123+02:00"}"#,
            &ValueKind::record("Tunnel"),
        )
        .unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 8, 15, 30).unwrap()
            + chrono::Duration::milliseconds(123);
        assert_eq!(
            value.as_record().unwrap().get("timeCreated"),
            Some(&Value::Timestamp(expected))
        );

        let err = decode(r#"{"id":"a","timeCreated":"yesterday"}"#, &ValueKind::record("Tunnel"))
            .unwrap_err();
        assert!(matches!(err, CodecError::TimestampParse { .. }));
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("timeCreated"));
    }

    #[test]
    fn test_nested_paths_and_opaque_tags() {
        let (value, _) = decode(
            r#"{"id":"i","tunnels":[{"id":"t","definedTags":{"Ops":{"Cost":42}},"freeformTags":{"a":"b"}}]}"#,
            &ValueKind::record("Instance"),
        )
        .unwrap();
        let tunnels = value.as_record().unwrap().get("tunnels").unwrap().as_sequence().unwrap();
        let tunnel = tunnels[0].as_record().unwrap();
        let defined = tunnel.get("definedTags").unwrap();
        assert_eq!(
            defined.entry("Ops").and_then(|ops| ops.entry("Cost")),
            Some(&Value::Opaque(json!(42)))
        );

        let err = decode(
            r#"{"id":"i","tunnels":[{"id":"t"},{"id":5}]}"#,
            &ValueKind::record("Instance"),
        )
        .unwrap_err();
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("tunnels[1].id"));
    }

    #[test]
    fn test_empty_enum_is_absent() {
        let (value, _) =
            decode(r#"{"id":"a","ikeVersion":""}"#, &ValueKind::record("Tunnel")).unwrap();
        assert!(!value.as_record().unwrap().contains("ikeVersion"));
    }
}
