//! Quorum: API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quorum_core::error::DomainError;
use quorum_core::outcome::{Failure, FailureKind};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer error: a rejected use case, a fault, or a request without a
/// usable actor.
#[derive(Debug)]
pub enum ApiError {
    /// The use case returned `Outcome::Failure`.
    Rejected(Failure),
    /// The use case failed with a fault.
    Fault(DomainError),
    /// The actor header is missing or malformed.
    MissingActor(String),
}

impl From<Failure> for ApiError {
    fn from(failure: Failure) -> Self {
        Self::Rejected(failure)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Fault(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            Self::Rejected(failure) => {
                let (status, code) = match failure.kind {
                    FailureKind::NotFound => (StatusCode::NOT_FOUND, "resource_not_found"),
                    FailureKind::NotAllowed => (StatusCode::FORBIDDEN, "not_allowed"),
                    FailureKind::Validation => (StatusCode::BAD_REQUEST, "validation_error"),
                };
                (status, code, failure.detail)
            }
            Self::Fault(err) => {
                error!(error = %err, "request failed");
                let (status, code) = match &err {
                    DomainError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
                    DomainError::Dispatch { .. } => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "dispatch_fault")
                    }
                    DomainError::EventDecoding { .. } | DomainError::Infrastructure(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
                    }
                };
                (status, code, err.to_string())
            }
            Self::MissingActor(message) => (StatusCode::UNAUTHORIZED, "missing_actor", message),
        };

        let body = ErrorBody {
            error: error_code,
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        let response = err.into().into_response();
        response.status()
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            status_of(Failure::not_found("question")),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_not_allowed_maps_to_403() {
        assert_eq!(
            status_of(Failure::not_allowed("not the author")),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(Failure::validation("title must not be empty")),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_dispatch_fault_maps_to_500() {
        assert_eq!(
            status_of(DomainError::Dispatch {
                event_type: "forum.answer_created".into(),
                handler: "notify".into(),
                message: "boom".into(),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_conflict_maps_to_409() {
        assert_eq!(
            status_of(DomainError::Conflict("slug hello is taken".into())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        assert_eq!(
            status_of(DomainError::Infrastructure("store down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_missing_actor_maps_to_401() {
        assert_eq!(
            status_of(ApiError::MissingActor("x-actor-id header is required".into())),
            StatusCode::UNAUTHORIZED
        );
    }
}
