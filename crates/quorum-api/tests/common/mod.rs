//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use quorum_api::actor::ACTOR_HEADER;
use quorum_api::state::AppState;
use quorum_test_support::FixedClock;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

/// Builds the full app router over in-memory stores and a fixed clock. The
/// state is returned alongside so tests can reach the dispatcher.
pub fn build_test_app() -> (Router, AppState) {
    let state = AppState::in_memory(Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    )));
    (quorum_api::build_router(state.clone()), state)
}

/// Sends a request, optionally as `actor` and with a JSON body, and returns
/// the status with the decoded body (`Value::Null` when empty).
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    actor: Option<Uuid>,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor_id) = actor {
        builder = builder.header(ACTOR_HEADER, actor_id.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Sends a POST request with a JSON body as `actor`.
pub async fn post_json(app: Router, uri: &str, actor: Uuid, body: &Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(actor), Some(body)).await
}

/// Sends an anonymous GET request.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None, None).await
}

/// Registers a student and returns their id.
pub async fn register_student(app: &Router, name: &str) -> Uuid {
    let body = serde_json::json!({ "name": name, "email": format!("{name}@example.com") });
    let (status, json) = send(app.clone(), "POST", "/api/v1/students", None, Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().parse().unwrap()
}
