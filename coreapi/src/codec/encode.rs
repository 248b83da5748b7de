//! [`Value`] to JSON encoding.

use chrono::SecondsFormat;
use coreapi_define::{FloatWidth, Location, RecordDescriptor, ScalarKind, SchemaRegistry, ValueKind};
use serde_json::{Map, Number, Value as Json};

use super::EncodeOptions;
use super::decode::parse_timestamp;
use crate::error::CodecError;
use crate::path::FieldPath;
use crate::validate::{belongs_to, is_empty_enum};
use crate::value::{Record, Value};

/// Stateless encoder over one registry.
pub(crate) struct Encoder<'r> {
    registry: &'r SchemaRegistry,
    options: EncodeOptions,
}

impl<'r> Encoder<'r> {
    pub(crate) fn new(registry: &'r SchemaRegistry, options: EncodeOptions) -> Self {
        Self { registry, options }
    }

    pub(crate) fn value(&self, value: &Value, kind: &ValueKind, path: &FieldPath) -> Result<Json, CodecError> {
        if value.is_null() {
            return Ok(Json::Null);
        }
        match kind {
            ValueKind::Scalar(scalar) => encode_scalar(value, *scalar, path),
            ValueKind::Enum(name) => self.enumeration(value, name, path),
            ValueKind::Record(name) => {
                let descriptor = self.registry.lookup(name)?;
                if descriptor.is_polymorphic_base() {
                    return self.polymorphic(value, descriptor, path);
                }
                match value {
                    Value::Record(record) if record.name() == name => {
                        self.record(descriptor, record, path)
                    }
                    Value::Record(record) => Err(CodecError::mismatch(path, name.as_str(), record.name())),
                    other => Err(CodecError::mismatch(path, name.as_str(), other.kind_name())),
                }
            }
            ValueKind::Polymorphic(base) => {
                let descriptor = self.registry.lookup(base)?;
                self.polymorphic(value, descriptor, path)
            }
            ValueKind::SequenceOf(item) => match value {
                Value::Sequence(items) => items
                    .iter()
                    .enumerate()
                    .map(|(i, element)| self.value(element, item, &path.index(i)))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Json::Array),
                Value::Opaque(json @ Json::Array(_)) => Ok(json.clone()),
                other => Err(CodecError::mismatch(path, kind.describe(), other.kind_name())),
            },
            ValueKind::MappingOf(item) => match value {
                Value::Mapping(entries) => {
                    let mut pairs: Vec<&(String, Value)> = entries.iter().collect();
                    if self.options.sorted_keys {
                        pairs.sort_by(|a, b| a.0.cmp(&b.0));
                    }
                    let mut map = Map::with_capacity(pairs.len());
                    for (key, element) in pairs {
                        map.insert(key.clone(), self.value(element, item, &path.key(key))?);
                    }
                    Ok(Json::Object(map))
                }
                Value::Opaque(json @ Json::Object(_)) => Ok(self.sort_if_requested(json.clone())),
                other => Err(CodecError::mismatch(path, kind.describe(), other.kind_name())),
            },
            ValueKind::Opaque => Ok(self.sort_if_requested(opaque(value))),
        }
    }

    /// Emits a record's body fields in descriptor order, discriminator first,
    /// then any extras the schema does not describe.
    pub(crate) fn record(
        &self,
        descriptor: &RecordDescriptor,
        record: &Record,
        path: &FieldPath,
    ) -> Result<Json, CodecError> {
        let mut out = Map::new();

        if let Some(discriminator) = descriptor.discriminator() {
            let tag = descriptor
                .tag()
                .or_else(|| record.tag())
                .ok_or_else(|| CodecError::MissingVariantTag {
                    path: path.clone(),
                    record: descriptor.name.clone(),
                })?;
            out.insert(discriminator.to_string(), Json::String(tag.to_string()));
        }

        for field in descriptor.fields_at(Location::Body) {
            let field_path = path.field(&field.wire_name);
            match record.get(&field.name) {
                Some(value) if !is_empty_enum(value, &field.kind) => {
                    let json = self.value(value, &field.kind, &field_path)?;
                    out.insert(field.wire_name.clone(), json);
                }
                _ if !field.required && field.omit_empty => {}
                _ => {
                    out.insert(field.wire_name.clone(), Json::Null);
                }
            }
        }

        for (key, value) in record.extra() {
            if !out.contains_key(key) {
                out.insert(key.clone(), value.clone());
            }
        }

        Ok(Json::Object(out))
    }

    fn polymorphic(&self, value: &Value, base: &RecordDescriptor, path: &FieldPath) -> Result<Json, CodecError> {
        match value {
            Value::Unrecognized(sentinel) => Ok(sentinel.raw.clone()),
            Value::Record(record) => {
                let descriptor = self.registry.lookup(record.name())?;
                if !belongs_to(descriptor, &base.name) {
                    return Err(CodecError::mismatch(
                        path,
                        format!("variant of {}", base.name),
                        record.name(),
                    ));
                }
                self.record(descriptor, record, path)
            }
            other => Err(CodecError::mismatch(path, base.name.as_str(), other.kind_name())),
        }
    }

    fn enumeration(&self, value: &Value, name: &str, path: &FieldPath) -> Result<Json, CodecError> {
        let Some(raw) = value.as_str() else {
            return Err(CodecError::mismatch(path, format!("enum {name}"), value.kind_name()));
        };
        if raw.is_empty() {
            return Ok(Json::Null);
        }
        let descriptor = self.registry.enums().get(name)?;
        let spelled = descriptor.canonical(raw).unwrap_or(raw);
        Ok(Json::String(spelled.to_string()))
    }

    fn sort_if_requested(&self, json: Json) -> Json {
        if self.options.sorted_keys { sort_keys(json) } else { json }
    }
}

fn encode_scalar(value: &Value, kind: ScalarKind, path: &FieldPath) -> Result<Json, CodecError> {
    let mismatch = || CodecError::mismatch(path, kind.label(), value.kind_name());
    match (kind, value) {
        (ScalarKind::String, Value::String(s)) => Ok(Json::String(s.clone())),
        (ScalarKind::Boolean, Value::Bool(b)) => Ok(Json::Bool(*b)),
        (ScalarKind::Integer(width), Value::Integer(i)) if width.contains(*i) => Ok(Json::from(*i)),
        (ScalarKind::Integer(width), Value::Float(f)) => {
            width.from_f64(*f).map(Json::from).ok_or_else(mismatch)
        }
        (ScalarKind::Float(_), Value::Integer(i)) => Ok(Json::from(*i)),
        (ScalarKind::Float(width), Value::Float(f))
            if width == FloatWidth::F64 || f.abs() <= f64::from(f32::MAX) =>
        {
            Number::from_f64(*f).map(Json::Number).ok_or_else(mismatch)
        }
        (ScalarKind::Timestamp, Value::Timestamp(t)) => {
            Ok(Json::String(t.to_rfc3339_opts(SecondsFormat::Millis, true)))
        }
        (ScalarKind::Timestamp, Value::String(s)) => {
            let t = parse_timestamp(s, path)?;
            Ok(Json::String(t.to_rfc3339_opts(SecondsFormat::Millis, true)))
        }
        _ => Err(mismatch()),
    }
}

/// Generic conversion for free-form slots; records keep logical names.
pub(crate) fn opaque(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Integer(i) => Json::from(*i),
        Value::Float(f) => Number::from_f64(*f).map_or(Json::Null, Json::Number),
        Value::String(s) => Json::String(s.clone()),
        Value::Timestamp(t) => Json::String(t.to_rfc3339_opts(SecondsFormat::Millis, true)),
        Value::Enum(e) => Json::String(e.value.clone()),
        Value::Sequence(items) => Json::Array(items.iter().map(opaque).collect()),
        Value::Mapping(entries) => Json::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), opaque(v)))
                .collect(),
        ),
        Value::Record(record) => {
            let mut map: Map<String, Json> = record
                .fields()
                .map(|(k, v)| (k.to_string(), opaque(v)))
                .collect();
            for (key, extra) in record.extra() {
                map.entry(key.clone()).or_insert_with(|| extra.clone());
            }
            Json::Object(map)
        }
        Value::Unrecognized(sentinel) => sentinel.raw.clone(),
        Value::Opaque(json) => json.clone(),
    }
}

fn sort_keys(json: Json) -> Json {
    match json {
        Json::Object(map) => {
            let mut entries: Vec<(String, Json)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Json::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect())
        }
        Json::Array(items) => Json::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
