//! End-to-end flow: questions, answers, and the notifications they trigger.

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_answer_and_best_answer_notify_the_right_students() {
    // Arrange
    let (app, _) = common::build_test_app();
    let asker = common::register_student(&app, "asker").await;
    let helper = common::register_student(&app, "helper").await;
    let (status, question) = common::post_json(
        app.clone(),
        "/api/v1/questions",
        asker,
        &json!({
            "title": "What is the difference between Rc and Arc in practice?",
            "content": "I keep seeing both.",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let question_id = question["question_id"].as_str().unwrap();

    // Act
    let (status, answer) = common::post_json(
        app.clone(),
        &format!("/api/v1/questions/{question_id}/answers"),
        helper,
        &json!({ "content": "Arc uses atomic reference counting." }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    let (status, inbox) =
        common::send(app.clone(), "GET", "/api/v1/notifications", Some(asker), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(inbox.as_array().unwrap().len(), 1);
    assert_eq!(
        inbox[0]["title"],
        "New answer on \"What is the difference between Rc and Ar...\""
    );
    assert_eq!(inbox[0]["content"], "Arc uses atomic reference counting....");

    // Act
    let answer_id = answer["answer_id"].as_str().unwrap();
    let (status, chosen) = common::send(
        app.clone(),
        "PATCH",
        &format!("/api/v1/answers/{answer_id}/choose-as-best"),
        Some(asker),
        None,
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chosen["best_answer_id"], answer_id);
    let (_, inbox) =
        common::send(app.clone(), "GET", "/api/v1/notifications", Some(helper), None).await;
    assert_eq!(inbox.as_array().unwrap().len(), 1);
    assert_eq!(inbox[0]["title"], "Your answer was chosen!");
    assert_eq!(
        inbox[0]["content"],
        "The answer you sent on \"What is the differen...\" was chosen by the author."
    );

    // Act
    let notification_id = inbox[0]["id"].as_str().unwrap();
    let (status, read) = common::send(
        app,
        "PATCH",
        &format!("/api/v1/notifications/{notification_id}/read"),
        Some(helper),
        None,
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["read_at"], "2026-01-15T10:00:00Z");
}

#[tokio::test]
async fn test_question_details_and_answers_carry_author_names() {
    // Arrange
    let (app, _) = common::build_test_app();
    let asker = common::register_student(&app, "asker").await;
    let helper = common::register_student(&app, "helper").await;
    let (_, question) = common::post_json(
        app.clone(),
        "/api/v1/questions",
        asker,
        &json!({ "title": "Lifetimes in structs", "content": "How?" }),
    )
    .await;
    let question_id = question["question_id"].as_str().unwrap();
    common::post_json(
        app.clone(),
        &format!("/api/v1/questions/{question_id}/answers"),
        helper,
        &json!({ "content": "Add a lifetime parameter." }),
    )
    .await;

    // Act
    let (status, details) = common::get_json(app.clone(), "/api/v1/questions/lifetimes-in-structs").await;
    let (_, answers) =
        common::get_json(app, &format!("/api/v1/questions/{question_id}/answers")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["author_name"], "asker");
    assert_eq!(answers[0]["author_name"], "helper");
}

#[tokio::test]
async fn test_deleting_question_removes_it_from_recent_list() {
    // Arrange
    let (app, _) = common::build_test_app();
    let asker = common::register_student(&app, "asker").await;
    let (_, question) = common::post_json(
        app.clone(),
        "/api/v1/questions",
        asker,
        &json!({ "title": "Short lived", "content": "Soon gone" }),
    )
    .await;
    let question_id = question["question_id"].as_str().unwrap();

    // Act
    let (status, _) = common::send(
        app.clone(),
        "DELETE",
        &format!("/api/v1/questions/{question_id}"),
        Some(asker),
        None,
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, recent) = common::get_json(app, "/api/v1/questions?page=1").await;
    assert!(recent.as_array().unwrap().is_empty());
}
