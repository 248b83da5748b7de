//! String coercion for path, query and header slots.

use coreapi_define::{ScalarKind, SchemaRegistry, ValueKind};
use serde_json::Value as Json;

use super::decode::parse_timestamp;
use super::encode::Encoder;
use super::EncodeOptions;
use crate::error::CodecError;
use crate::path::FieldPath;
use crate::value::{EnumValue, Value};

/// Renders a scalar or enum value as it appears in a URL or header.
///
/// Returns `None` for absent values and empty enum strings.
pub(crate) fn to_string(
    registry: &SchemaRegistry,
    value: &Value,
    kind: &ValueKind,
    path: &FieldPath,
) -> Result<Option<String>, CodecError> {
    if !matches!(kind, ValueKind::Scalar(_) | ValueKind::Enum(_)) {
        return Err(CodecError::mismatch(path, "scalar or enum", kind.describe()));
    }
    let json = Encoder::new(registry, EncodeOptions::default()).value(value, kind, path)?;
    match json {
        Json::Null => Ok(None),
        Json::String(s) => Ok(Some(s)),
        Json::Bool(b) => Ok(Some(b.to_string())),
        Json::Number(n) => Ok(Some(n.to_string())),
        other => Err(CodecError::mismatch(path, kind.describe(), json_kind(&other))),
    }
}

/// Parses a header value into the declared kind.
pub(crate) fn from_str(
    registry: &SchemaRegistry,
    raw: &str,
    kind: &ValueKind,
    path: &FieldPath,
) -> Result<Value, CodecError> {
    let mismatch = || CodecError::mismatch(path, kind.describe(), format!("'{raw}'"));
    match kind {
        ValueKind::Scalar(ScalarKind::String) => Ok(Value::String(raw.to_string())),
        ValueKind::Scalar(ScalarKind::Boolean) => {
            raw.parse::<bool>().map(Value::Bool).map_err(|_| mismatch())
        }
        ValueKind::Scalar(ScalarKind::Integer(width)) => match raw.parse::<i64>() {
            Ok(i) if width.contains(i) => Ok(Value::Integer(i)),
            _ => Err(mismatch()),
        },
        ValueKind::Scalar(ScalarKind::Float(_)) => {
            raw.parse::<f64>().map(Value::Float).map_err(|_| mismatch())
        }
        ValueKind::Scalar(ScalarKind::Timestamp) => parse_timestamp(raw, path).map(Value::Timestamp),
        ValueKind::Enum(name) => {
            let descriptor = registry.enums().get(name)?;
            Ok(Value::Enum(match descriptor.canonical(raw) {
                Some(canonical) => EnumValue::known(name, canonical),
                None => EnumValue::unknown(name, raw),
            }))
        }
        _ => Err(mismatch()),
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Array(_) => "array",
        Json::Object(_) => "object",
        _ => "scalar",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::tests::fixture;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_to_string() {
        let registry = fixture();
        let root = FieldPath::root();
        let enum_kind = ValueKind::enumeration("IkeVersion");
        assert_eq!(
            to_string(&registry, &Value::from("v1"), &enum_kind, &root).unwrap().as_deref(),
            Some("V1")
        );
        assert_eq!(to_string(&registry, &Value::from(""), &enum_kind, &root).unwrap(), None);
        assert_eq!(to_string(&registry, &Value::Null, &ValueKind::string(), &root).unwrap(), None);
        assert_eq!(
            to_string(&registry, &Value::from(25), &ValueKind::int32(), &root).unwrap().as_deref(),
            Some("25")
        );
        assert_eq!(
            to_string(&registry, &Value::from(true), &ValueKind::boolean(), &root)
                .unwrap()
                .as_deref(),
            Some("true")
        );
        let t = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            to_string(&registry, &Value::from(t), &ValueKind::timestamp(), &root)
                .unwrap()
                .as_deref(),
            Some("2024-01-02T03:04:05.000Z")
        );
    }

    #[test]
    fn test_to_string_rejects_structures() {
        let registry = fixture();
        let err = to_string(
            &registry,
            &Value::from(vec!["a"]),
            &ValueKind::sequence_of(ValueKind::string()),
            &FieldPath::root().field("ids"),
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn test_from_str() {
        let registry = fixture();
        let root = FieldPath::root();
        assert_eq!(
            from_str(&registry, "42", &ValueKind::int64(), &root).unwrap(),
            Value::Integer(42)
        );
        assert!(from_str(&registry, "4x", &ValueKind::int64(), &root).is_err());
        assert_eq!(
            from_str(&registry, "v2", &ValueKind::enumeration("IkeVersion"), &root).unwrap(),
            Value::Enum(EnumValue::known("IkeVersion", "V2"))
        );
        assert!(matches!(
            from_str(&registry, "soon", &ValueKind::timestamp(), &root),
            Err(CodecError::TimestampParse { .. })
        ));
    }
}
