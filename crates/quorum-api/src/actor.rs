//! Acting-student extractor.
//!
//! Authentication is out of scope; callers name the acting student in the
//! [`ACTOR_HEADER`] header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the acting student's id.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// The student performing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor(pub Uuid);

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ACTOR_HEADER)
            .ok_or_else(|| ApiError::MissingActor(format!("{ACTOR_HEADER} header is required")))?;
        let value = raw
            .to_str()
            .map_err(|_| ApiError::MissingActor(format!("{ACTOR_HEADER} must be ASCII")))?;
        let actor_id = Uuid::parse_str(value.trim())
            .map_err(|e| ApiError::MissingActor(format!("{ACTOR_HEADER} must be a UUID: {e}")))?;
        Ok(Self(actor_id))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(request: Request<()>) -> Result<Actor, ApiError> {
        let (mut parts, ()) = request.into_parts();
        Actor::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_actor_is_read_from_header() {
        let actor_id = Uuid::new_v4();
        let request = Request::builder()
            .header(ACTOR_HEADER, actor_id.to_string())
            .body(())
            .unwrap();

        let actor = extract(request).await.unwrap();

        assert_eq!(actor, Actor(actor_id));
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let request = Request::builder().body(()).unwrap();

        let result = extract(request).await;

        assert!(matches!(result, Err(ApiError::MissingActor(_))));
    }

    #[tokio::test]
    async fn test_malformed_header_is_rejected() {
        let request = Request::builder()
            .header(ACTOR_HEADER, "not-a-uuid")
            .body(())
            .unwrap();

        let result = extract(request).await;

        assert!(matches!(result, Err(ApiError::MissingActor(_))));
    }
}
