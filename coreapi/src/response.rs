//! Response binding.
//!
//! [`ResponseBinder::bind`] fills an operation's response envelope from a raw
//! HTTP response. Body fields are decoded through the [`Codec`]; header
//! fields are read by wire name and coerced to their declared kind. A missing
//! or empty header leaves its field absent.
//!
//! Non-2xx responses become [`RemoteError`]s. The standard error body
//! (`code`, `message`) is decoded when possible; when it is not, the reason is
//! kept in [`RemoteError::body_error`] and the status is still reported.

use bytes::Bytes;
use coreapi_define::{FieldDescriptor, Location, Operation, RecordDescriptor, SchemaRegistry};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::codec::Codec;
use crate::error::{ApiError, RemoteError};
use crate::path::FieldPath;
use crate::validate::{Violation, ViolationKind};
use crate::value::{Record, Value};

/// Header echoing the request's correlation id.
pub const REQUEST_ID_HEADER: &str = "opc-request-id";

/// A response as received from the executor.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw body bytes.
    pub body: Bytes,
}

impl RawResponse {
    /// Creates a response with no headers.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns a header value as text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A successful response bound to its envelope record.
#[derive(Debug, Clone)]
pub struct BoundResponse {
    /// HTTP status code.
    pub status: u16,
    /// Envelope record, keyed by the response record's logical field names.
    pub envelope: Record,
    /// The underlying response.
    pub raw: RawResponse,
    /// Deferred violations from decoding the body.
    pub violations: Vec<Violation>,
    /// Non-fatal decode notes.
    pub warnings: Vec<String>,
    body_field: Option<String>,
}

impl BoundResponse {
    /// The decoded body entity, for envelopes with a single body field.
    pub fn body(&self) -> Option<&Value> {
        self.body_field.as_deref().and_then(|name| self.envelope.get(name))
    }

    /// Consumes the response, returning the body entity.
    pub fn into_body(mut self) -> Option<Value> {
        let name = self.body_field.take()?;
        self.envelope.remove(&name).filter(|v| !v.is_null())
    }

    /// Any envelope field by logical name.
    pub fn header_field(&self, name: &str) -> Option<&Value> {
        self.envelope.get(name)
    }

    /// Pagination cursor from `opc-next-page`.
    pub fn next_page(&self) -> Option<&str> {
        self.envelope.get_str("nextPage")
    }

    /// Echoed `opc-request-id`, from the envelope or the raw headers.
    pub fn request_id(&self) -> Option<&str> {
        self.envelope
            .get_str("opcRequestId")
            .or_else(|| self.raw.header(REQUEST_ID_HEADER))
    }

    /// Entity tag for optimistic concurrency.
    pub fn etag(&self) -> Option<&str> {
        self.envelope.get_str("etag")
    }
}

/// Standard error body of the service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Binds raw responses to response envelopes.
#[derive(Debug, Clone, Copy)]
pub struct ResponseBinder<'r> {
    registry: &'r SchemaRegistry,
}

impl<'r> ResponseBinder<'r> {
    /// Creates a binder over `registry`.
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Binds `raw` to `operation`'s response envelope.
    ///
    /// ## Errors
    ///
    /// - [`ApiError::Remote`] for non-2xx statuses
    /// - [`ApiError::Codec`] when the body or a header fails to decode
    /// - [`ApiError::Schema`] when the envelope is not registered
    pub fn bind(&self, operation: &Operation, raw: RawResponse) -> Result<BoundResponse, ApiError> {
        if !raw.is_success() {
            let remote = remote_error(&raw);
            debug!(operation = %operation.id, status = raw.status, "remote error");
            return Err(remote.into());
        }

        let descriptor = self.registry.lookup(&operation.response)?;
        let codec = Codec::new(self.registry);
        let mut envelope = Record::new(&descriptor.name);
        let mut violations = Vec::new();
        let mut warnings = Vec::new();

        let body_fields: Vec<&FieldDescriptor> = descriptor.fields_at(Location::Body).collect();
        let body_field = match body_fields.as_slice() {
            [field] => Some(field.name.clone()),
            _ => None,
        };
        let blank = raw.body.iter().all(u8::is_ascii_whitespace);

        match body_fields.as_slice() {
            [] => {}
            fields if blank => {
                for field in fields.iter().filter(|f| f.required) {
                    violations.push(Violation::new(
                        FieldPath::root().field(&field.wire_name),
                        ViolationKind::MissingMandatory,
                    ));
                }
            }
            [field] => {
                let decoded = codec.decode(&raw.body, &field.kind)?;
                if !decoded.value.is_null() {
                    envelope.set(&field.name, decoded.value);
                }
                violations.extend(decoded.violations);
                warnings.extend(decoded.warnings);
            }
            fields => {
                let shape = RecordDescriptor::new(&descriptor.name)
                    .fields(fields.iter().map(|f| (*f).clone()));
                let decoded = codec.decode_record(&raw.body, &shape)?;
                if let Value::Record(body) = decoded.value {
                    for (name, value) in body.fields() {
                        envelope.set(name, value.clone());
                    }
                    for (key, value) in body.extra() {
                        envelope.extra_mut().insert(key.clone(), value.clone());
                    }
                }
                violations.extend(decoded.violations);
                warnings.extend(decoded.warnings);
            }
        }

        for field in descriptor.fields_at(Location::Header) {
            let Some(header) = raw.headers.get(field.wire_name.as_str()) else {
                continue;
            };
            let Ok(text) = header.to_str() else {
                warnings.push(format!("{}: header is not visible ASCII", field.wire_name));
                continue;
            };
            if text.is_empty() {
                continue;
            }
            let slot = FieldPath::root().field(&field.wire_name);
            let value = codec.scalar_from_str(text, &field.kind, &slot)?;
            envelope.set(&field.name, value);
        }

        debug!(
            operation = %operation.id,
            status = raw.status,
            body_bytes = raw.body.len(),
            violations = violations.len(),
            "bound response"
        );

        Ok(BoundResponse {
            status: raw.status,
            envelope,
            raw,
            violations,
            warnings,
            body_field,
        })
    }
}

fn remote_error(raw: &RawResponse) -> RemoteError {
    let request_id = raw.header(REQUEST_ID_HEADER).map(str::to_string);
    let parsed = if raw.body.is_empty() {
        Err("empty error body".to_string())
    } else {
        serde_json::from_slice::<ErrorBody>(&raw.body).map_err(|e| e.to_string())
    };
    match parsed {
        Ok(body) => RemoteError {
            status: raw.status,
            code: body.code,
            message: body.message,
            request_id,
            body_error: None,
        },
        Err(reason) => {
            warn!(status = raw.status, reason = %reason, "remote error body did not decode");
            RemoteError {
                status: raw.status,
                code: None,
                message: None,
                request_id,
                body_error: Some(reason),
            }
        }
    }
}
