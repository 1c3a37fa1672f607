//! Integration tests for the invex API router.
//!
//! These tests run against the in-memory store with the demo
//! connector reachable and the VCenter connector registered but
//! unconnectable, which mirrors a typical lab deployment.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use invex_api::{api_routes, ApiState};
use invex_connector::registry::{ConnectorRegistry, ConnectorSpec};
use invex_connector::types::ConnectorType;
use invex_connector_demo::DemoConnector;
use invex_connector_vcenter::VCenterConnector;
use invex_jobs::{JobCatalog, JobStore, SchemaProjector};
use invex_store::{DocumentStore, MemoryStore};

struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
}

fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let doc_store: Arc<dyn DocumentStore> = store.clone();

    let mut registry = ConnectorRegistry::new(doc_store.clone());
    registry.register(ConnectorSpec::new(
        ConnectorType::Demo,
        &["api_key"],
        Arc::new(|| Arc::new(DemoConnector::new())),
    ));
    registry.register(ConnectorSpec::new(
        ConnectorType::VCenter,
        &["password"],
        Arc::new(|| Arc::new(VCenterConnector::new())),
    ));
    let registry = Arc::new(registry);

    let catalog = Arc::new(JobCatalog::builtin());
    let projector = Arc::new(SchemaProjector::new(catalog, registry.clone()));
    let jobs = Arc::new(JobStore::new(doc_store.clone()));

    TestApp {
        router: api_routes(ApiState::new(registry, projector, jobs, doc_store)),
        store,
    }
}

async fn request(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn status_reports_ok_and_backend() {
    let app = test_app();
    let (status, body) = request(&app.router, Method::GET, "/api", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("OK"));
    assert_eq!(body["store"], json!("memory"));
}

#[tokio::test]
async fn submit_then_delete_scenario() {
    let app = test_app();

    // Submit {pk:"j1", job_type:"Demo", value:5} -> pending record.
    let (status, record) = request(
        &app.router,
        Method::POST,
        "/job",
        Some(json!({"pk": "j1", "job_type": "DemoJob", "value": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["pk"], json!("j1"));
    assert_eq!(record["status"], json!("pending"));
    assert_eq!(record["value"], json!(5));
    // Normalized: the store's _id surfaces as id.
    assert!(record.get("id").and_then(Value::as_str).is_some());
    assert!(record.get("_id").is_none());

    // Read it back by pk.
    let (status, fetched) = request(&app.router, Method::GET, "/job/j1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["pk"], json!("j1"));

    // Delete while pending removes the record.
    let (status, body) = request(
        &app.router,
        Method::POST,
        "/job",
        Some(json!({"pk": "j1", "action": "delete"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], json!(1));

    // Subsequent read is a 404.
    let (status, body) = request(&app.router, Method::GET, "/job/j1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("not_found"));
}

#[tokio::test]
async fn submit_forces_pending_regardless_of_caller_status() {
    let app = test_app();
    let (_, record) = request(
        &app.router,
        Method::POST,
        "/job",
        Some(json!({"pk": "j2", "status": "processing"})),
    )
    .await;
    assert_eq!(record["status"], json!("pending"));
}

#[tokio::test]
async fn non_pending_job_rejects_changes_with_structured_result() {
    let app = test_app();
    request(
        &app.router,
        Method::POST,
        "/job",
        Some(json!({"pk": "j3", "value": 1})),
    )
    .await;

    // Simulate the external executor advancing the job.
    let mut record = app
        .store
        .find_one("job", "pk", &json!("j3"))
        .await
        .unwrap()
        .unwrap();
    record["status"] = json!("processing");
    app.store
        .upsert("job", "pk", &json!("j3"), record)
        .await
        .unwrap();

    let (status, body) = request(
        &app.router,
        Method::POST,
        "/job",
        Some(json!({"pk": "j3", "action": "delete"})),
    )
    .await;
    // A structured result, not an error status.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("cannot change job at this state"));
    assert_eq!(body["res"], json!(0));

    // And the record is untouched.
    let (_, fetched) = request(&app.router, Method::GET, "/job/j3", None).await;
    assert_eq!(fetched["status"], json!("processing"));
    assert_eq!(fetched["value"], json!(1));
}

#[tokio::test]
async fn submit_without_pk_is_a_validation_error() {
    let app = test_app();
    let (status, body) = request(
        &app.router,
        Method::POST,
        "/job",
        Some(json!({"value": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("validation_error"));
}

#[tokio::test]
async fn listing_filters_by_timestamp() {
    let app = test_app();
    request(
        &app.router,
        Method::POST,
        "/job",
        Some(json!({"pk": "early"})),
    )
    .await;

    let (_, listing) = request(&app.router, Method::GET, "/job", None).await;
    let cutoff = listing["timestamp"].as_str().unwrap().to_string();
    assert_eq!(listing["objects"].as_array().unwrap().len(), 1);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    request(
        &app.router,
        Method::POST,
        "/job",
        Some(json!({"pk": "late"})),
    )
    .await;

    let uri = format!("/job?timestamp={}", urlencode(&cutoff));
    let (status, listing) = request(&app.router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let objects = listing["objects"].as_array().unwrap();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0]["pk"], json!("late"));
}

#[tokio::test]
async fn malformed_timestamp_is_rejected() {
    let app = test_app();
    let (status, body) = request(&app.router, Method::GET, "/job?timestamp=yesterday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("invalid_timestamp"));
}

#[tokio::test]
async fn connector_settings_round_trip_redacts_and_preserves_secret() {
    let app = test_app();

    let (status, stored) = request(
        &app.router,
        Method::POST,
        "/connector",
        Some(json!({
            "type": "VCenterConnector",
            "host": "vc.example",
            "username": "admin",
            "password": "hunter2"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // Never echoed, even immediately after the write that set it.
    assert_eq!(stored["password"], json!(""));

    // A later write omitting the password keeps the stored one.
    request(
        &app.router,
        Method::POST,
        "/connector",
        Some(json!({
            "type": "VCenterConnector",
            "host": "vc2.example",
            "username": "admin",
            "password": ""
        })),
    )
    .await;

    let (status, settings) = request(
        &app.router,
        Method::GET,
        "/connector?type=VCenterConnector",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["host"], json!("vc2.example"));
    assert_eq!(settings["password"], json!(""));

    let raw = app
        .store
        .find_one("connector", "type", &json!("VCenterConnector"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(raw["password"], json!("hunter2"));
}

#[tokio::test]
async fn unknown_connector_type_reads_as_empty_document() {
    let app = test_app();
    let (status, body) = request(
        &app.router,
        Method::GET,
        "/connector?type=HyperVConnector",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn connector_write_without_type_is_rejected() {
    let app = test_app();
    let (status, body) = request(
        &app.router,
        Method::POST,
        "/connector",
        Some(json!({"host": "vc.example"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("validation_error"));
}

#[tokio::test]
async fn job_menu_lists_only_jobs_with_reachable_connectors() {
    let app = test_app();
    let (status, menu) = request(&app.router, Method::GET, "/jobcreate", None).await;
    assert_eq!(status, StatusCode::OK);

    let entries = menu["oneOf"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["title"], json!("DemoJob"));
}

#[tokio::test]
async fn schema_projection_carries_types_and_live_choices() {
    let app = test_app();
    // Activate connectors first, as a UI would via the menu call.
    request(&app.router, Method::GET, "/jobcreate", None).await;

    let (status, schema) =
        request(&app.router, Method::GET, "/jobcreate?type=DemoJob", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(schema["title"], json!("DemoJob Job"));
    assert_eq!(schema["properties"]["value"]["type"], json!("number"));
    assert_eq!(
        schema["properties"]["region"]["enum"],
        json!(["eu-west", "us-east", "ap-south"])
    );
}

#[tokio::test]
async fn unknown_job_type_projects_to_empty_document() {
    let app = test_app();
    let (status, schema) =
        request(&app.router, Method::GET, "/jobcreate?type=NoSuchJob", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(schema, json!({}));
}

#[tokio::test]
async fn unreachable_connector_job_projects_to_empty_document() {
    let app = test_app();
    request(&app.router, Method::GET, "/jobcreate", None).await;

    let (status, schema) = request(
        &app.router,
        Method::GET,
        "/jobcreate?type=VCenterExportJob",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(schema, json!({}));
}

/// Percent-encode the characters that appear in RFC 3339 timestamps.
fn urlencode(raw: &str) -> String {
    raw.replace('+', "%2B").replace(':', "%3A")
}
