//! Call API Integration Tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use neoservice::config::DatabaseConfig;
use neoservice::domain::document::DocumentStore;
use neoservice::infrastructure::persistence::InMemoryDocumentStore;
use neoservice::interface::api::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // For `oneshot`

#[tokio::test]
async fn test_api_start_call() {
    let app = setup_api_test();

    let (status, json) = post(&app, "/api/calls", json!({"title": "standup"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "active");
    assert!(!json["call_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_api_start_call_returns_fresh_ids() {
    let app = setup_api_test();

    let (_, first) = post(&app, "/api/calls", json!({})).await;
    let (_, second) = post(&app, "/api/calls", json!({"participant": "bob"})).await;

    assert_ne!(first["call_id"], second["call_id"]);
}

#[tokio::test]
async fn test_api_list_calls_respects_limit() {
    let app = setup_api_test();
    for i in 0..3 {
        post(&app, "/api/calls", json!({"title": format!("call-{}", i)})).await;
    }

    let (status, json) = get(&app, "/api/calls?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    let calls = json.as_array().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0]["title"], "call-0");
    assert_eq!(calls[1]["title"], "call-1");

    let (_, json) = get(&app, "/api/calls?limit=0").await;
    assert!(json.as_array().unwrap().is_empty());

    let (_, json) = get(&app, "/api/calls").await;
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_api_list_calls_default_limit_is_twenty() {
    let app = setup_api_test();
    for _ in 0..25 {
        post(&app, "/api/calls", json!({})).await;
    }

    let (_, json) = get(&app, "/api/calls").await;
    assert_eq!(json.as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_api_list_calls_negative_limit() {
    let app = setup_api_test();

    let (status, json) = get(&app, "/api/calls?limit=-5").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["detail"].as_str().unwrap().contains("limit"));
}

#[tokio::test]
async fn test_api_call_lifecycle() {
    let app = setup_api_test();

    let (_, started) = post(&app, "/api/calls", json!({"title": "standup"})).await;
    let call_id = started["call_id"].as_str().unwrap().to_string();

    let before = chrono::Utc::now();
    let (status, json) = post(
        &app,
        "/api/calls/event",
        json!({"call_id": call_id, "type": "transcript", "text": "hello"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"ok": true}));

    let (_, json) = get(&app, "/api/calls").await;
    let call = &json.as_array().unwrap()[0];
    assert_eq!(call["_id"], call_id.as_str());
    assert_eq!(call["status"], "active");
    let events = call["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["call_id"], call_id.as_str());
    assert_eq!(events[0]["type"], "transcript");
    assert_eq!(events[0]["text"], "hello");
    let timestamp: chrono::DateTime<chrono::Utc> =
        events[0]["timestamp"].as_str().unwrap().parse().unwrap();
    assert!(timestamp >= before);
    assert_eq!(call["updated_at"], events[0]["timestamp"]);

    let (status, json) = post(&app, "/api/calls/end", json!({"call_id": call_id})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"ok": true}));

    let (_, json) = get(&app, "/api/calls").await;
    let call = &json.as_array().unwrap()[0];
    assert_eq!(call["status"], "ended");
    assert!(call["ended_at"].is_string());
    assert!(call["duration_seconds"].as_i64().unwrap() >= 0);
    assert_eq!(call["events"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_api_add_event_grows_events_by_one() {
    let app = setup_api_test();
    let (_, started) = post(&app, "/api/calls", json!({})).await;
    let call_id = started["call_id"].as_str().unwrap().to_string();

    for text in ["one", "two", "three"] {
        post(
            &app,
            "/api/calls/event",
            json!({"call_id": call_id, "type": "transcript", "text": text}),
        )
        .await;
    }
    post(&app, "/api/calls/event", json!({"call_id": call_id, "type": "status"})).await;

    let (_, json) = get(&app, "/api/calls").await;
    let events = json[0]["events"].as_array().unwrap();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0]["text"], "one");
    assert_eq!(events[2]["text"], "three");
    assert_eq!(events[3]["type"], "status");
    assert!(events[3]["text"].is_null());
}

#[tokio::test]
async fn test_api_add_event_to_unknown_call_still_ok() {
    let app = setup_api_test();

    let (status, json) = post(
        &app,
        "/api/calls/event",
        json!({"call_id": uuid::Uuid::new_v4().to_string(), "type": "status"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], true);

    let (_, json) = get(&app, "/api/calls").await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_api_add_event_malformed_id() {
    let app = setup_api_test();

    let (status, json) = post(
        &app,
        "/api/calls/event",
        json!({"call_id": "abc123", "type": "transcript", "text": "hello"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["detail"].as_str().unwrap().contains("abc123"));
}

#[tokio::test]
async fn test_api_add_event_missing_type_is_rejected() {
    let app = setup_api_test();

    let (status, json) = post(&app, "/api/calls/event", json!({"call_id": "abc123"})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["detail"].as_str().unwrap().contains("missing field `type`"));
}

#[tokio::test]
async fn test_api_unparsable_body_gets_detail_envelope() {
    let app = setup_api_test();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/calls/end")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    let (status, json) = read_json(response).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn test_api_list_calls_non_numeric_limit() {
    let app = setup_api_test();

    let (status, json) = get(&app, "/api/calls?limit=abc").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["detail"].as_str().unwrap().contains("query string"));
}

#[tokio::test]
async fn test_api_list_calls_passes_foreign_records_through() {
    let (app, store) = setup_api_test_with_store();
    post(&app, "/api/calls", json!({"title": "regular"})).await;
    store
        .create(
            "call",
            json!({
                "title": "imported",
                "status": "on-hold",
                "recording_url": "s3://calls/imported.wav",
                "events": [{"type": "transcript", "text": "no timestamp"}]
            }),
        )
        .await
        .unwrap();

    let (status, json) = get(&app, "/api/calls").await;

    assert_eq!(status, StatusCode::OK);
    let calls = json.as_array().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0]["title"], "regular");
    assert_eq!(calls[0]["status"], "active");
    assert_eq!(calls[1]["title"], "imported");
    assert_eq!(calls[1]["status"], "on-hold");
    assert_eq!(calls[1]["recording_url"], "s3://calls/imported.wav");
    assert_eq!(calls[1]["events"][0]["text"], "no timestamp");
    assert!(calls[1]["_id"].is_string());
}

#[tokio::test]
async fn test_api_end_call_not_found() {
    let (app, store) = setup_api_test_with_store();
    post(&app, "/api/calls", json!({"title": "untouched"})).await;

    let (status, json) = post(
        &app,
        "/api/calls/end",
        json!({"call_id": uuid::Uuid::new_v4().to_string()}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({"detail": "Call not found"}));

    let docs = store
        .query("call", Default::default(), 10)
        .await
        .unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["status"], "active");
}

#[tokio::test]
async fn test_api_end_call_twice_overwrites() {
    let app = setup_api_test();
    let (_, started) = post(&app, "/api/calls", json!({})).await;
    let call_id = started["call_id"].as_str().unwrap().to_string();

    post(&app, "/api/calls/end", json!({"call_id": call_id})).await;
    let (_, json) = get(&app, "/api/calls").await;
    let first_end = json[0]["ended_at"].as_str().unwrap().to_string();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (status, _) = post(&app, "/api/calls/end", json!({"call_id": call_id})).await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = get(&app, "/api/calls").await;
    assert_eq!(json[0]["status"], "ended");
    assert_ne!(json[0]["ended_at"].as_str().unwrap(), first_end);
}

#[tokio::test]
async fn test_api_without_store() {
    let state = AppState::new(None, &DatabaseConfig::default());
    let app = build_router(state, PrometheusBuilder::new().build_recorder().handle());

    let (status, json) = post(&app, "/api/calls", json!({"title": "standup"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["detail"], "Database not available");

    let (status, _) = get(&app, "/api/calls").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = post(
        &app,
        "/api/calls/end",
        json!({"call_id": uuid::Uuid::new_v4().to_string()}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// Helper functions

fn setup_api_test() -> Router {
    setup_api_test_with_store().0
}

fn setup_api_test_with_store() -> (Router, Arc<InMemoryDocumentStore>) {
    let store = Arc::new(InMemoryDocumentStore::new());
    let state = AppState::new(
        Some(store.clone() as Arc<dyn DocumentStore>),
        &DatabaseConfig::default(),
    );

    // Recorder is built but not installed, so tests can run in parallel
    let prometheus_handle = PrometheusBuilder::new().build_recorder().handle();

    (build_router(state, prometheus_handle), store)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    read_json(response).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}
