//! Fields and enums shared by every Core Services resource.
//!
//! Most request records carry the same handful of headers (`opc-request-id`,
//! `opc-retry-token`, `if-match`) and list requests share their pagination
//! and sort parameters. Response envelopes share `opc-request-id`,
//! `opc-next-page` and `etag`.

use coreapi_define::prelude::*;

/// Enum for `sortOrder` query parameters.
pub const SORT_ORDER: &str = "SortOrder";

/// Enum for `sortBy` on list operations sorted by creation time or name.
pub const SORT_BY: &str = "SortBy";

/// Standard error body returned with every non-2xx response.
pub const ERROR: &str = "Error";

/// Registers the shared enums and the standard error record.
pub fn register(builder: &mut SchemaRegistryBuilder) {
    builder
        .enumeration(EnumDescriptor::new(SORT_ORDER, ["ASC", "DESC"]))
        .enumeration(EnumDescriptor::new(SORT_BY, ["TIMECREATED", "DISPLAYNAME"]))
        .record(
            RecordDescriptor::new(ERROR)
                .with_description("Error information returned by the service")
                .field(FieldDescriptor::body("code", ValueKind::string()).required())
                .field(FieldDescriptor::body("message", ValueKind::string()).required()),
        );
}

/// `opc-request-id` header, read and written as `opcRequestId`.
pub fn opc_request_id() -> FieldDescriptor {
    FieldDescriptor::header("opc-request-id", ValueKind::string())
        .named("opcRequestId")
        .with_description("Unique identifier for the request, echoed back by the service")
}

/// `opc-retry-token` header for idempotent retries of create / action calls.
pub fn opc_retry_token() -> FieldDescriptor {
    FieldDescriptor::header("opc-retry-token", ValueKind::string()).named("opcRetryToken")
}

/// `if-match` header for optimistic concurrency.
pub fn if_match() -> FieldDescriptor {
    FieldDescriptor::header("if-match", ValueKind::string()).named("ifMatch")
}

/// Mandatory `compartmentId` query parameter.
pub fn compartment_query() -> FieldDescriptor {
    FieldDescriptor::query("compartmentId", ValueKind::string()).required()
}

/// Pagination parameters: `limit` then `page`.
pub fn pagination() -> [FieldDescriptor; 2] {
    [
        FieldDescriptor::query("limit", ValueKind::int32()),
        FieldDescriptor::query("page", ValueKind::string()),
    ]
}

/// Sort parameters: `sortBy` then `sortOrder`.
pub fn sorting() -> [FieldDescriptor; 2] {
    [
        FieldDescriptor::query("sortBy", ValueKind::enumeration(SORT_BY)),
        FieldDescriptor::query("sortOrder", ValueKind::enumeration(SORT_ORDER)),
    ]
}

/// `definedTags`: namespace → key → value.
pub fn defined_tags() -> FieldDescriptor {
    FieldDescriptor::body("definedTags", ValueKind::defined_tags())
}

/// `freeformTags`: key → value.
pub fn freeform_tags() -> FieldDescriptor {
    FieldDescriptor::body("freeformTags", ValueKind::string_map())
}

/// Response `etag` header.
pub fn etag() -> FieldDescriptor {
    FieldDescriptor::header("etag", ValueKind::string())
}

/// Response `opc-next-page` header, read back as `nextPage`.
pub fn next_page() -> FieldDescriptor {
    FieldDescriptor::header("opc-next-page", ValueKind::string()).named("nextPage")
}

/// Envelope for a paginated list: body array of `item` plus cursor headers.
pub fn list_response(name: &str, item: &str) -> RecordDescriptor {
    RecordDescriptor::new(name)
        .field(
            FieldDescriptor::body("items", ValueKind::sequence_of(ValueKind::record(item)))
                .keep_empty(),
        )
        .field(opc_request_id())
        .field(next_page())
}

/// Envelope for a single entity returned with its `etag`.
pub fn entity_response(name: &str, field: &str, record: &str) -> RecordDescriptor {
    RecordDescriptor::new(name)
        .field(FieldDescriptor::body(field, ValueKind::record(record)))
        .field(etag())
        .field(opc_request_id())
}

/// Envelope for calls that only return headers.
pub fn empty_response(name: &str) -> RecordDescriptor {
    RecordDescriptor::new(name).field(opc_request_id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_response_shape() {
        let record = list_response("ListVolumesResponse", "Volume");
        assert_eq!(record.fields_at(Location::Body).count(), 1);
        assert_eq!(record.field_named("nextPage").unwrap().wire_name, "opc-next-page");
        assert!(!record.field_named("items").unwrap().omit_empty);
    }

    #[test]
    fn header_helpers_rename() {
        assert_eq!(opc_request_id().name, "opcRequestId");
        assert_eq!(if_match().wire_name, "if-match");
        assert_eq!(opc_retry_token().location, Location::Header);
    }
}
