//! End-to-end scenarios against the Core Services tables.
//!
//! Each test walks one path through the codec, validator and binders the
//! way a caller would, without a network.

use coreapi::{
    Codec, EnumValue, RawResponse, Record, RequestBinder, ResponseBinder, RetryMetadata, Validator, Value,
    ViolationKind,
};
use coreapi_define::{SchemaRegistry, ValueKind};
use coreapi_definitions::compute::{instance, maintenance, platform};
use coreapi_definitions::core_services;
use coreapi_definitions::networking::drg;
use coreapi_definitions::storage::volume;
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::json;
use url::Url;

fn registry() -> &'static SchemaRegistry {
    core_services().expect("core services tables are consistent")
}

fn endpoint() -> Url {
    Url::parse("https://iaas.us-ashburn-1.oraclecloud.com/20160918").unwrap()
}

fn volume_json(id: &str) -> serde_json::Value {
    json!({
        "availabilityDomain": "Uocm:PHX-AD-1",
        "compartmentId": "ocid1.compartment.oc1..c",
        "displayName": "data",
        "id": id,
        "lifecycleState": "AVAILABLE",
        "sizeInMBs": 51200,
        "timeCreated": "2024-03-01T10:00:00.000Z"
    })
}

#[test]
fn platform_config_polymorphic_round_trip() {
    let codec = Codec::new(registry());
    let kind = ValueKind::polymorphic(platform::PLATFORM_CONFIG);
    let input = json!({"type":"AMD_MILAN_BM_GPU","isSecureBootEnabled":true,"numaNodesPerSocket":"NPS2"});

    let decoded = codec.decode(input.to_string().as_bytes(), &kind).unwrap();
    assert!(decoded.violations.is_empty());

    let config = decoded.value.as_record().expect("recognized variant");
    assert_eq!(config.name(), platform::variant_record("AmdMilanBmGpu"));
    assert_eq!(config.tag(), Some("AMD_MILAN_BM_GPU"));
    assert_eq!(config.get("isSecureBootEnabled"), Some(&Value::Bool(true)));
    assert_eq!(
        config.get("numaNodesPerSocket"),
        Some(&Value::Enum(EnumValue::known(platform::NUMA_NODES_PER_SOCKET, "NPS2")))
    );

    assert_eq!(codec.encode(&decoded.value, &kind).unwrap(), input);
}

#[test]
fn case_insensitive_enum_query_is_canonical() {
    let registry = registry();
    let request: Value = Record::new("ListInstancesRequest")
        .with("compartmentId", "ocid1.compartment.oc1..c")
        .with("lifecycleState", "running")
        .into();

    assert!(Validator::new(registry).validate(&request).is_ok());

    let operation = registry.operation(instance::LIST_INSTANCES).unwrap();
    let bound = RequestBinder::new(registry, endpoint())
        .bind(operation, &request, RetryMetadata::default())
        .unwrap();
    assert!(bound.query_pairs().contains(&("lifecycleState".to_string(), "RUNNING".to_string())));
    assert_eq!(
        bound.url.query(),
        Some("compartmentId=ocid1.compartment.oc1..c&lifecycleState=RUNNING")
    );
}

#[test]
fn missing_statement_action_is_reported_at_its_path() {
    let statement: Value = Record::new(drg::STATEMENT)
        .with(
            "matchCriteria",
            vec![Record::new("DrgAttachmentMatchAllDrgRouteDistributionMatchCriteria")],
        )
        .with("priority", 1)
        .into();

    let report = Validator::new(registry()).validate(&statement).unwrap_err();
    assert_eq!(report.len(), 1);

    let violation = &report.violations()[0];
    assert_eq!(violation.path.to_string(), "action");
    assert_eq!(violation.kind, ViolationKind::MissingMandatory);
    assert_eq!(violation.kind.label(), "missing-mandatory");
    assert!(violation.accepted().is_empty());
    assert!(!violation.to_string().contains("accepted values"));
}

#[test]
fn unknown_platform_variant_is_preserved() {
    let codec = Codec::new(registry());
    let kind = ValueKind::polymorphic(platform::PLATFORM_CONFIG);
    let input = r#"{"type":"FUTURE_CPU_BM","someNewField":123}"#;

    let decoded = codec.decode(input.as_bytes(), &kind).unwrap();
    let sentinel = decoded.value.as_unrecognized().expect("unrecognized sentinel");
    assert_eq!(sentinel.tag.as_deref(), Some("FUTURE_CPU_BM"));
    assert_eq!(sentinel.raw_field("someNewField"), Some(&json!(123)));

    let report = Validator::new(registry()).validate(&decoded.value).unwrap_err();
    assert_eq!(report.len(), 1);
    assert!(report.violations()[0].path.is_root());
    assert_eq!(report.violations()[0].kind.label(), "polymorphic-unresolved");

    let bytes = codec.to_vec(&decoded.value, &kind).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), input);
}

#[test]
fn maintenance_event_request_partitions_fields() {
    let registry = registry();
    let request: Value = Record::new("ListInstanceMaintenanceEventsRequest")
        .with("compartmentId", "ocid1.compartment.oc1..c")
        .with("page", "p2")
        .with("opcRequestId", "req-7")
        .into();

    let operation = registry
        .operation(maintenance::LIST_INSTANCE_MAINTENANCE_EVENTS)
        .unwrap();
    let bound = RequestBinder::new(registry, endpoint())
        .bind(operation, &request, RetryMetadata::default())
        .unwrap();

    assert_eq!(
        bound.url.as_str(),
        "https://iaas.us-ashburn-1.oraclecloud.com/20160918/instanceMaintenanceEvents?compartmentId=ocid1.compartment.oc1..c&page=p2"
    );
    assert!(bound.query_pairs().iter().all(|(k, _)| k != "instanceAction"));
    assert_eq!(bound.header("opc-request-id"), Some("req-7"));
    assert!(bound.body.is_none());
}

#[test]
fn next_page_header_binds_into_envelope() {
    let registry = registry();
    let operation = registry.operation(volume::LIST_VOLUMES).unwrap();
    let body = serde_json::to_vec(&json!([volume_json("x")])).unwrap();

    let raw = RawResponse::new(200, body.clone()).with_header(
        HeaderName::from_static("opc-next-page"),
        HeaderValue::from_static("cursor42"),
    );
    let bound = ResponseBinder::new(registry).bind(operation, raw).unwrap();
    let items = bound.body().and_then(Value::as_sequence).unwrap();
    assert_eq!(items[0].as_record().unwrap().get_str("id"), Some("x"));
    assert_eq!(bound.next_page(), Some("cursor42"));
    assert_eq!(bound.header_field("nextPage"), Some(&Value::from("cursor42")));

    let raw = RawResponse::new(200, body);
    let bound = ResponseBinder::new(registry).bind(operation, raw).unwrap();
    assert_eq!(bound.next_page(), None);
    assert!(bound.envelope.get("nextPage").is_none());
}

#[test]
fn single_entity_response_exposes_etag() {
    let registry = registry();
    let operation = registry.operation(volume::GET_VOLUME).unwrap();
    let raw = RawResponse::new(200, volume_json("v1").to_string())
        .with_header(HeaderName::from_static("etag"), HeaderValue::from_static("e-9"));

    let bound = ResponseBinder::new(registry).bind(operation, raw).unwrap();
    let volume = bound.body().and_then(Value::as_record).unwrap();
    assert_eq!(volume.get_str("lifecycleState"), Some("AVAILABLE"));
    assert_eq!(bound.etag(), Some("e-9"));
    assert!(bound.violations.is_empty());
}
