//! Request binding.
//!
//! [`RequestBinder::bind`] turns a request record into an [`HttpRequest`]:
//!
//! 1. validate the record; any violation aborts with [`BindError::Invalid`]
//! 2. substitute path fields into the operation's `{placeholders}`
//! 3. append query fields in declaration order, one pair per sequence item
//! 4. set header fields by wire name
//! 5. encode body fields as JSON
//!
//! Nothing is sent; the request is handed to a signer and an executor.
//!
//! ## Examples
//!
//! ```
//! use coreapi::{Record, RequestBinder, RetryMetadata};
//! use coreapi_define::{FieldDescriptor, Operation, RecordDescriptor, RestMethod, SchemaRegistry, ValueKind};
//! use url::Url;
//!
//! let mut builder = SchemaRegistry::builder();
//! builder
//!     .record(
//!         RecordDescriptor::new("GetVolumeRequest")
//!             .field(FieldDescriptor::path("volumeId", ValueKind::string()))
//!             .field(FieldDescriptor::header("opc-request-id", ValueKind::string()).named("opcRequestId")),
//!     )
//!     .record(RecordDescriptor::new("GetVolumeResponse"))
//!     .operation(Operation::new(
//!         "GetVolume",
//!         RestMethod::Get,
//!         "/volumes/{volumeId}",
//!         "GetVolumeRequest",
//!         "GetVolumeResponse",
//!     ));
//! let registry = builder.build().unwrap();
//!
//! let binder = RequestBinder::new(&registry, Url::parse("https://iaas.example.com/20160918").unwrap());
//! let request = Record::new("GetVolumeRequest")
//!     .with("volumeId", "ocid1.volume.oc1..aaaa")
//!     .with("opcRequestId", "req-1");
//! let bound = binder
//!     .bind(registry.operation("GetVolume").unwrap(), &request.into(), RetryMetadata::default())
//!     .unwrap();
//!
//! assert_eq!(bound.url.as_str(), "https://iaas.example.com/20160918/volumes/ocid1.volume.oc1..aaaa");
//! assert_eq!(bound.header("opc-request-id"), Some("req-1"));
//! assert!(bound.body.is_none());
//! ```

use bytes::Bytes;
use coreapi_define::{
    FieldDescriptor, Location, Operation, RecordDescriptor, RestMethod, SchemaRegistry, ValueKind,
};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::debug;
use url::Url;

use crate::codec::Codec;
use crate::error::{BindError, CodecError};
use crate::path::FieldPath;
use crate::validate::{ErrorReport, Validator};
use crate::value::{Record, Value};

/// Header carrying the caller's idempotency token.
pub const RETRY_TOKEN_HEADER: &str = "opc-retry-token";

/// Everything outside RFC 3986 `pchar`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@');

/// RFC 3986 query characters minus the pair delimiters `&`, `=`, `+` and `;`.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b',')
    .remove(b':')
    .remove(b'@')
    .remove(b'/')
    .remove(b'?');

/// Retry hints forwarded verbatim with a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryMetadata {
    /// Idempotency token sent as `opc-retry-token` unless the request sets one.
    pub retry_token: Option<String>,
    /// Attempts the caller allows; opaque to this crate.
    pub attempt_budget: Option<u32>,
}

impl RetryMetadata {
    /// Metadata carrying a retry token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            retry_token: Some(token.into()),
            attempt_budget: None,
        }
    }

    /// Sets the attempt budget.
    pub fn attempts(mut self, budget: u32) -> Self {
        self.attempt_budget = Some(budget);
        self
    }
}

/// A bound request, ready for signing and execution.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Operation the request was bound for.
    pub operation_id: String,
    /// HTTP method.
    pub method: RestMethod,
    /// Full URL including the query string.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// JSON body, if the operation has body fields and any were set.
    pub body: Option<Bytes>,
    /// Retry hints from the caller.
    pub retry: RetryMetadata,
}

impl HttpRequest {
    /// Returns a header value as text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Decoded query pairs in order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

/// Binds request records to HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBinder<'r> {
    registry: &'r SchemaRegistry,
    base_url: Url,
}

impl<'r> RequestBinder<'r> {
    /// Creates a binder that prefixes every path with `base_url`.
    pub fn new(registry: &'r SchemaRegistry, base_url: Url) -> Self {
        Self { registry, base_url }
    }

    /// The endpoint prefix.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Binds `request` for `operation`.
    ///
    /// ## Errors
    ///
    /// - [`BindError::Invalid`] if validation finds any violation
    /// - [`BindError::PathPlaceholderUnbound`] if a placeholder renders empty
    /// - [`BindError::DotSegment`] if a placeholder renders as `.` or `..`
    /// - [`BindError::InvalidHeader`] if a header cannot be sent
    /// - [`BindError::Codec`] if a value cannot be encoded
    /// - [`BindError::Schema`] if a descriptor is missing
    pub fn bind(
        &self,
        operation: &Operation,
        request: &Value,
        retry: RetryMetadata,
    ) -> Result<HttpRequest, BindError> {
        let descriptor = self.registry.lookup(&operation.request)?;
        let record = match request {
            Value::Record(record) if record.name() == descriptor.name => record,
            Value::Record(record) => {
                return Err(CodecError::mismatch(
                    &FieldPath::root(),
                    descriptor.name.as_str(),
                    record.name(),
                )
                .into());
            }
            other => {
                return Err(CodecError::mismatch(
                    &FieldPath::root(),
                    descriptor.name.as_str(),
                    other.kind_name(),
                )
                .into());
            }
        };

        let mut violations = Vec::new();
        Validator::new(self.registry).collect_record(descriptor, record, &mut violations);
        if let Some(report) = ErrorReport::from_violations(violations) {
            debug!(operation = %operation.id, violations = report.len(), "request rejected");
            return Err(BindError::Invalid(report));
        }

        let codec = Codec::new(self.registry);
        let path = bind_path(&codec, operation, descriptor, record)?;
        let query = bind_query(&codec, descriptor, record)?;

        let mut headers = HeaderMap::new();
        for field in descriptor.fields_at(Location::Header) {
            let Some(value) = record.get(&field.name) else {
                continue;
            };
            let slot = FieldPath::root().field(&field.wire_name);
            if let Some(rendered) = codec.scalar_to_string(value, &field.kind, &slot)? {
                let (name, value) = header_pair(&field.wire_name, &rendered)?;
                headers.insert(name, value);
            }
        }
        if let Some(token) = &retry.retry_token {
            if !headers.contains_key(RETRY_TOKEN_HEADER) {
                let (name, value) = header_pair(RETRY_TOKEN_HEADER, token)?;
                headers.insert(name, value);
            }
        }

        let body = bind_body(&codec, descriptor, record)?;
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let mut target = format!("{}{path}", self.base_url.as_str().trim_end_matches('/'));
        if !query.is_empty() {
            target.push('?');
            target.push_str(&query);
        }
        let url = Url::parse(&target)?;

        debug!(
            operation = %operation.id,
            method = %operation.method,
            url = %url,
            body_bytes = body.as_ref().map_or(0, Bytes::len),
            "bound request"
        );

        Ok(HttpRequest {
            operation_id: operation.id.clone(),
            method: operation.method,
            url,
            headers,
            body,
            retry,
        })
    }
}

fn bind_path(
    codec: &Codec<'_>,
    operation: &Operation,
    descriptor: &RecordDescriptor,
    record: &Record,
) -> Result<String, BindError> {
    let unbound = |placeholder: &str| BindError::PathPlaceholderUnbound {
        operation: operation.id.clone(),
        placeholder: placeholder.to_string(),
    };

    let mut path = String::with_capacity(operation.path.len());
    let mut rest = operation.path.as_str();
    while let Some(start) = rest.find('{') {
        path.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            return Err(unbound(after));
        };
        let placeholder = &after[..end];
        let field = descriptor
            .fields_at(Location::Path)
            .find(|f| f.wire_name == placeholder)
            .ok_or_else(|| unbound(placeholder))?;
        let rendered = codec
            .scalar_to_string(
                record.get_or_null(&field.name),
                &field.kind,
                &FieldPath::root().field(&field.wire_name),
            )?
            .filter(|s| !s.is_empty())
            .ok_or_else(|| unbound(placeholder))?;
        if rendered == "." || rendered == ".." {
            return Err(BindError::DotSegment {
                operation: operation.id.clone(),
                placeholder: placeholder.to_string(),
                value: rendered,
            });
        }
        path.extend(utf8_percent_encode(&rendered, PATH_SEGMENT));
        rest = &after[end + 1..];
    }
    path.push_str(rest);
    Ok(path)
}

fn bind_query(codec: &Codec<'_>, descriptor: &RecordDescriptor, record: &Record) -> Result<String, BindError> {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    for field in descriptor.fields_at(Location::Query) {
        let Some(value) = record.get(&field.name) else {
            continue;
        };
        let slot = FieldPath::root().field(&field.wire_name);
        match (&field.kind, value) {
            (ValueKind::SequenceOf(item), Value::Sequence(items)) => {
                for (i, element) in items.iter().enumerate() {
                    if let Some(rendered) = query_value(codec, field, element, item, &slot.index(i))? {
                        pairs.push((field.wire_name.as_str(), rendered));
                    }
                }
            }
            (ValueKind::SequenceOf(item), single) => {
                if let Some(rendered) = query_value(codec, field, single, item, &slot)? {
                    pairs.push((field.wire_name.as_str(), rendered));
                }
            }
            (kind, value) => {
                if let Some(rendered) = query_value(codec, field, value, kind, &slot)? {
                    pairs.push((field.wire_name.as_str(), rendered));
                }
            }
        }
    }

    let mut query = String::new();
    for (name, value) in pairs {
        if !query.is_empty() {
            query.push('&');
        }
        query.extend(utf8_percent_encode(name, QUERY));
        query.push('=');
        query.extend(utf8_percent_encode(&value, QUERY));
    }
    Ok(query)
}

/// Empty enums are dropped unless the field keeps empty values.
fn query_value(
    codec: &Codec<'_>,
    field: &FieldDescriptor,
    value: &Value,
    kind: &ValueKind,
    slot: &FieldPath,
) -> Result<Option<String>, BindError> {
    if !field.omit_empty && matches!(kind, ValueKind::Enum(_)) && value.as_str() == Some("") {
        return Ok(Some(String::new()));
    }
    Ok(codec.scalar_to_string(value, kind, slot)?)
}

/// A single body field is the whole body; several form an object keyed by
/// wire name.
fn bind_body(codec: &Codec<'_>, descriptor: &RecordDescriptor, record: &Record) -> Result<Option<Bytes>, BindError> {
    let fields: Vec<&FieldDescriptor> = descriptor.fields_at(Location::Body).collect();
    let json = match fields.as_slice() {
        [] => return Ok(None),
        [field] => match record.get(&field.name) {
            Some(value) => codec.encode(value, &field.kind)?,
            None => return Ok(None),
        },
        _ => codec.encode_record(record)?,
    };
    let bytes = serde_json::to_vec(&json).map_err(CodecError::Serialize)?;
    Ok(Some(Bytes::from(bytes)))
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), BindError> {
    let invalid = |reason: String| BindError::InvalidHeader {
        name: name.to_string(),
        reason,
    };
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
    let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
    Ok((header_name, header_value))
}
