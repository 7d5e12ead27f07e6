// Exercises the HTTP surface through the router without binding a socket.

mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use pomodoro_clock::create_router;

use common::{clock_with, RecordingAlert};

fn router() -> Router {
    create_router(clock_with(Arc::new(RecordingAlert::default())))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Post a raw body without a content type
async fn post_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn status_reports_the_default_clock() {
    let app = router();

    let (status, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clock"]["phase"], "session");
    assert_eq!(body["clock"]["label"], "Session");
    assert_eq!(body["clock"]["remaining_seconds"], 1500);
    assert_eq!(body["clock"]["time_left"], "25:00");
    assert_eq!(body["clock"]["minutes_left"], 25);
    assert_eq!(body["clock"]["break_minutes"], 5);
    assert_eq!(body["clock"]["session_minutes"], 25);
    assert_eq!(body["clock"]["running"], false);
    assert_eq!(body["alert_playing"], false);
}

#[tokio::test]
async fn click_adjusts_duration_without_a_body() {
    let app = router();

    let (status, body) = send(&app, "POST", "/session/increment", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "applied");
    assert_eq!(body["clock"]["session_minutes"], 26);
    assert_eq!(body["clock"]["time_left"], "26:00");

    let (_, body) = send(&app, "POST", "/break/decrement", Some(json!({"trigger": "click"}))).await;
    assert_eq!(body["status"], "applied");
    assert_eq!(body["clock"]["break_minutes"], 4);
}

#[tokio::test]
async fn non_arrow_keys_are_ignored() {
    let app = router();

    let (status, body) = send(
        &app,
        "POST",
        "/break/increment",
        Some(json!({"trigger": "key", "key": "Enter"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["clock"]["break_minutes"], 5);

    let (_, body) = send(
        &app,
        "POST",
        "/break/increment",
        Some(json!({"trigger": "key", "key": "ArrowUp"})),
    )
    .await;
    assert_eq!(body["status"], "applied");
    assert_eq!(body["clock"]["break_minutes"], 6);
}

#[tokio::test]
async fn key_filter_applies_without_json_content_type() {
    let app = router();

    let (status, body) = post_raw(&app, "/break/increment", r#"{"trigger":"key","key":"Enter"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["clock"]["break_minutes"], 5);

    let (_, body) = post_raw(&app, "/break/increment", r#"{"trigger":"key","key":"ArrowUp"}"#).await;
    assert_eq!(body["status"], "applied");
    assert_eq!(body["clock"]["break_minutes"], 6);
}

#[tokio::test]
async fn malformed_trigger_is_ignored() {
    let app = router();

    let (status, body) = post_raw(&app, "/break/increment", r#"{"trigger":"key"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["clock"]["break_minutes"], 5);

    let (_, body) = send(
        &app,
        "POST",
        "/session/decrement",
        Some(json!({"trigger": "key"})),
    )
    .await;
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["clock"]["session_minutes"], 25);
}

#[tokio::test]
async fn out_of_range_adjustment_is_ignored() {
    let app = router();

    for _ in 0..4 {
        send(&app, "POST", "/break/decrement", None).await;
    }
    let (status, body) = send(&app, "POST", "/break/decrement", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["clock"]["break_minutes"], 1);
}

#[tokio::test]
async fn unknown_kind_is_not_found() {
    let app = router();

    let (status, _) = send(&app, "POST", "/lunch/increment", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn start_stop_toggles_and_blocks_adjustments() {
    let app = router();

    let (_, body) = send(&app, "POST", "/start_stop", None).await;
    assert_eq!(body["message"], "Clock started");
    assert_eq!(body["clock"]["running"], true);

    let (_, body) = send(&app, "POST", "/session/increment", None).await;
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["clock"]["session_minutes"], 25);

    let (_, body) = send(&app, "POST", "/start", None).await;
    assert_eq!(body["status"], "ignored");

    let (_, body) = send(&app, "POST", "/start_stop", None).await;
    assert_eq!(body["message"], "Clock paused");
    assert_eq!(body["clock"]["running"], false);

    let (_, body) = send(&app, "POST", "/pause", None).await;
    assert_eq!(body["status"], "ignored");
}

#[tokio::test]
async fn reset_restores_defaults() {
    let app = router();

    send(&app, "POST", "/session/decrement", None).await;
    send(&app, "POST", "/break/increment", None).await;
    send(&app, "POST", "/start_stop", None).await;

    let (status, body) = send(&app, "POST", "/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clock"]["running"], false);
    assert_eq!(body["clock"]["phase"], "session");
    assert_eq!(body["clock"]["remaining_seconds"], 1500);
    assert_eq!(body["clock"]["break_minutes"], 5);
    assert_eq!(body["clock"]["session_minutes"], 25);

    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["last_action"], "reset");
}

#[tokio::test]
async fn health_check_responds() {
    let app = router();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
