//! Quorum: HTTP API.
//!
//! Thin axum glue over the forum and notification use cases. Outcomes map to
//! status codes in [`error`]; the acting student is read from the
//! [`actor::ACTOR_HEADER`] header.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod actor;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use crate::state::AppState;

/// Builds the full application router: `/health` plus every context under
/// `/api/v1`.
pub fn build_router(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
