//! Integration tests for the HTTP client.
//!
//! These tests use wiremock to stand in for the service and verify the
//! requests the client sends and how it reads the answers.

use std::time::Duration;

use coreapi::{
    cancel_pair, ApiError, CallOptions, ClientConfig, CoreClient, HeaderSigner, Record, RetryMetadata, Value,
};
use coreapi_define::SchemaRegistry;
use coreapi_definitions::compute::maintenance;
use coreapi_definitions::core_services;
use coreapi_definitions::networking::drg;
use coreapi_definitions::storage::volume;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn registry() -> &'static SchemaRegistry {
    core_services().expect("core services tables are consistent")
}

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(Url::parse(&format!("{}/20160918", server.uri())).unwrap())
        .timeout(Duration::from_secs(5))
}

fn get_volume(id: &str) -> Value {
    Record::new("GetVolumeRequest").with("volumeId", id).into()
}

/// Test that a list call sends only the populated query parameters.
#[tokio::test]
async fn test_list_maintenance_events() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/20160918/instanceMaintenanceEvents"))
        .and(query_param("compartmentId", "ocid1.compartment.oc1..c"))
        .and(query_param("page", "p2"))
        .and(query_param_is_missing("instanceAction"))
        .and(header("opc-request-id", "req-7"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("opc-next-page", "p3")
                .insert_header("opc-request-id", "req-7")
                .set_body_json(json!([])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = CoreClient::from_config(registry(), config(&server)).unwrap();
    let request: Value = Record::new("ListInstanceMaintenanceEventsRequest")
        .with("compartmentId", "ocid1.compartment.oc1..c")
        .with("page", "p2")
        .with("opcRequestId", "req-7")
        .into();

    let response = client
        .call_by_id(maintenance::LIST_INSTANCE_MAINTENANCE_EVENTS, &request, CallOptions::default())
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body().and_then(Value::as_sequence).map(<[Value]>::len), Some(0));
    assert_eq!(response.next_page(), Some("p3"));
    assert_eq!(response.request_id(), Some("req-7"));
}

/// Test that a POST body carries canonical enums, discriminators and the retry token.
#[tokio::test]
async fn test_add_route_distribution_statements() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(
            "/20160918/drgRouteDistributions/drd-1/actions/addDrgRouteDistributionStatements",
        ))
        .and(header("content-type", "application/json"))
        .and(header("opc-retry-token", "retry-1"))
        .and(body_json(json!({
            "statements": [{
                "matchCriteria": [{"matchType": "DRG_ATTACHMENT_TYPE", "attachmentType": "VCN"}],
                "action": "ACCEPT",
                "priority": 1
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "stmt-1",
            "matchCriteria": [{"matchType": "DRG_ATTACHMENT_TYPE", "attachmentType": "VCN"}],
            "action": "ACCEPT",
            "priority": 1
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let statement = Record::new("AddDrgRouteDistributionStatementDetails")
        .with(
            "matchCriteria",
            vec![Record::new("DrgAttachmentTypeDrgRouteDistributionMatchCriteria").with("attachmentType", "vcn")],
        )
        .with("action", "accept")
        .with("priority", 1);
    let request: Value = Record::new("AddDrgRouteDistributionStatementsRequest")
        .with("drgRouteDistributionId", "drd-1")
        .with(
            "addDrgRouteDistributionStatementsDetails",
            Record::new("AddDrgRouteDistributionStatementsDetails").with("statements", vec![statement]),
        )
        .into();

    let client = CoreClient::from_config(registry(), config(&server)).unwrap();
    let options = CallOptions::default().retry(RetryMetadata::with_token("retry-1"));
    let response = client.call_by_id(drg::ADD_STATEMENTS, &request, options).await.unwrap();

    let items = response.body().and_then(Value::as_sequence).unwrap();
    let stored = items[0].as_record().unwrap();
    assert_eq!(stored.get_str("id"), Some("stmt-1"));
    let criteria = stored.get("matchCriteria").and_then(Value::as_sequence).unwrap();
    assert_eq!(criteria[0].as_record().unwrap().tag(), Some("DRG_ATTACHMENT_TYPE"));
}

/// Test that a 404 surfaces status, code and request id.
#[tokio::test]
async fn test_remote_error_is_decoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/20160918/volumes/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("opc-request-id", "req-404")
                .set_body_json(json!({
                    "code": "NotAuthorizedOrNotFound",
                    "message": "Authorization failed or requested resource not found."
                })),
        )
        .mount(&server)
        .await;

    let client = CoreClient::from_config(registry(), config(&server)).unwrap();
    let err = client
        .call_by_id(volume::GET_VOLUME, &get_volume("missing"), CallOptions::default())
        .await
        .unwrap_err();

    let remote = err.remote().expect("remote error");
    assert_eq!(remote.status, 404);
    assert_eq!(remote.code.as_deref(), Some("NotAuthorizedOrNotFound"));
    assert_eq!(remote.request_id.as_deref(), Some("req-404"));
    assert!(remote.body_error.is_none());
    assert_eq!(err.status_code(), Some(404));
    assert!(!err.is_retryable());
}

/// Test that an undecodable error body does not hide the status.
#[tokio::test]
async fn test_remote_error_with_garbage_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>upstream down</html>"))
        .mount(&server)
        .await;

    let client = CoreClient::from_config(registry(), config(&server)).unwrap();
    let err = client
        .call_by_id(volume::GET_VOLUME, &get_volume("v1"), CallOptions::default())
        .await
        .unwrap_err();

    let remote = err.remote().expect("remote error");
    assert_eq!(remote.status, 503);
    assert!(remote.code.is_none());
    assert!(remote.body_error.is_some());
    assert!(err.is_retryable());
}

/// Test that an invalid request is rejected before anything is sent.
#[tokio::test]
async fn test_invalid_request_is_not_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = CoreClient::from_config(registry(), config(&server)).unwrap();
    let request: Value = Record::new("ListInstanceMaintenanceEventsRequest")
        .with("lifecycleState", "napping")
        .into();
    let err = client
        .call_by_id(maintenance::LIST_INSTANCE_MAINTENANCE_EVENTS, &request, CallOptions::default())
        .await
        .unwrap_err();

    let report = err.report().expect("validation report");
    let labels: Vec<&str> = report.violations().iter().map(|v| v.kind.label()).collect();
    assert_eq!(labels, ["missing-mandatory", "unknown-enum"]);
    assert!(report.to_string().contains("accepted values: SCHEDULED, STARTED"));
}

/// Test that cancelling an in-flight call returns promptly.
#[tokio::test]
async fn test_cancel_in_flight_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let client = CoreClient::from_config(registry(), config(&server)).unwrap();
    let (handle, token) = cancel_pair();
    let canceller = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();
    };
    let request = get_volume("v1");
    let call = client.call_by_id(volume::GET_VOLUME, &request, CallOptions::default().cancel_with(token));

    let (result, ()) = tokio::join!(call, canceller);
    let err = result.unwrap_err();
    assert!(err.is_cancelled());
    assert!(matches!(err, ApiError::Client(_)));
}

/// Test that a signer's header reaches the wire.
#[tokio::test]
async fn test_bearer_signer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/20160918/volumes/v1"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "availabilityDomain": "AD-1",
            "compartmentId": "c",
            "displayName": "data",
            "id": "v1",
            "lifecycleState": "AVAILABLE",
            "sizeInMBs": 1024,
            "timeCreated": "2024-03-01T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CoreClient::from_config(registry(), config(&server))
        .unwrap()
        .with_signer(HeaderSigner::bearer("s3cret").unwrap());
    let response = client
        .call_by_id(volume::GET_VOLUME, &get_volume("v1"), CallOptions::default())
        .await
        .unwrap();

    let volume = response.body().and_then(Value::as_record).unwrap();
    assert_eq!(volume.get_str("id"), Some("v1"));
}
