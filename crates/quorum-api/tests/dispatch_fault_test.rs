//! A failing subscriber surfaces as a server error after the write is stored.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use quorum_forum::domain::events::ANSWER_CREATED_EVENT_TYPE;
use quorum_test_support::FailingHandler;
use serde_json::json;

#[tokio::test]
async fn test_failing_subscriber_returns_500_but_answer_is_stored() {
    // Arrange
    let (app, state) = common::build_test_app();
    state
        .dispatcher
        .register(ANSWER_CREATED_EVENT_TYPE, Arc::new(FailingHandler));
    let asker = common::register_student(&app, "asker").await;
    let helper = common::register_student(&app, "helper").await;
    let (_, question) = common::post_json(
        app.clone(),
        "/api/v1/questions",
        asker,
        &json!({ "title": "Dispatch", "content": "Faults" }),
    )
    .await;
    let question_id = question["question_id"].as_str().unwrap();

    // Act
    let (status, json) = common::post_json(
        app.clone(),
        &format!("/api/v1/questions/{question_id}/answers"),
        helper,
        &json!({ "content": "Stored anyway" }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "dispatch_fault");
    let (_, answers) =
        common::get_json(app.clone(), &format!("/api/v1/questions/{question_id}/answers")).await;
    assert_eq!(answers.as_array().unwrap().len(), 1);
    let (_, inbox) =
        common::send(app, "GET", "/api/v1/notifications", Some(asker), None).await;
    assert_eq!(inbox.as_array().unwrap().len(), 1);
}
