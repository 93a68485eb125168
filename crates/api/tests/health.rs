//! Integration tests for the health check endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, RecordingQueue};

#[tokio::test]
async fn health_check_reports_reachable_queue() {
    let app = build_test_app(RecordingQueue::new());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["queue_healthy"], true);
}

#[tokio::test]
async fn health_check_degrades_when_queue_is_down() {
    let app = build_test_app(RecordingQueue::failing());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["queue_healthy"], false);
}
