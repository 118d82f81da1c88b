//! Route modules organized by bounded context.

use axum::Router;

use crate::state::AppState;

pub mod answers;
pub mod attachments;
pub mod comments;
pub mod health;
pub mod notifications;
pub mod questions;
pub mod students;

/// Every versioned route, to be nested under `/api/v1`.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(students::router())
        .merge(attachments::router())
        .merge(questions::router())
        .merge(answers::router())
        .merge(comments::router())
        .merge(notifications::router())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use quorum_test_support::FixedClock;
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::actor::ACTOR_HEADER;
    use crate::state::AppState;

    pub(crate) fn test_state() -> AppState {
        AppState::in_memory(Arc::new(FixedClock::default_instant()))
    }

    /// Sends one request and returns the status with the decoded JSON body
    /// (`Value::Null` for an empty body).
    pub(crate) async fn send(
        app: Router,
        method: &str,
        uri: &str,
        actor: Option<Uuid>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(actor_id) = actor {
            builder = builder.header(ACTOR_HEADER, actor_id.to_string());
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap()
        };
        (status, json)
    }
}
