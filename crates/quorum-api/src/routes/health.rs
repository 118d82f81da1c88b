//! Health check endpoint.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::{Json, Router, routing::get};
use quorum_forum::domain::events::{
    ANSWER_CREATED_EVENT_TYPE, QUESTION_BEST_ANSWER_CHOSEN_EVENT_TYPE,
};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Subscriber count per forum event tag.
    pub subscribers: BTreeMap<&'static str, usize>,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let subscribers = [
        ANSWER_CREATED_EVENT_TYPE,
        QUESTION_BEST_ANSWER_CHOSEN_EVENT_TYPE,
    ]
    .into_iter()
    .map(|tag| (tag, state.dispatcher.handler_count(tag)))
    .collect();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        subscribers,
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use quorum_test_support::FixedClock;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_health_reports_registered_subscribers() {
        // Arrange
        let state = AppState::in_memory(Arc::new(FixedClock::default_instant()));
        let app = router().with_state(state);
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["subscribers"][ANSWER_CREATED_EVENT_TYPE], 1);
        assert_eq!(json["subscribers"][QUESTION_BEST_ANSWER_CHOSEN_EVENT_TYPE], 1);
    }
}
