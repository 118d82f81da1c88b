//! Routes for the acting student's notifications.

use axum::extract::{Path, Query, State};
use axum::{Json, Router, routing::get, routing::patch};
use quorum_core::pagination::PaginationParams;
use tracing::{info, instrument};
use uuid::Uuid;

use quorum_notification::application::{command_handlers, query_handlers};
use quorum_notification::domain::aggregates::Notification;
use quorum_notification::domain::commands;

use crate::actor::Actor;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /notifications?page=N
#[instrument(skip(state, actor), fields(actor_id = %actor.0))]
async fn fetch_notifications(
    State(state): State<AppState>,
    actor: Actor,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let notifications =
        query_handlers::fetch_recipient_notifications(actor.0, params, &*state.notifications)
            .await?
            .into_result()?;
    Ok(Json(notifications))
}

/// PATCH /notifications/{notification_id}/read
#[instrument(skip(state, actor), fields(actor_id = %actor.0))]
async fn read_notification(
    State(state): State<AppState>,
    actor: Actor,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<Notification>, ApiError> {
    let command = commands::ReadNotification {
        notification_id,
        recipient_id: actor.0,
    };

    info!("handling read_notification command");

    let notification = command_handlers::handle_read_notification(
        &command,
        state.clock.as_ref(),
        &*state.notifications,
    )
    .await?
    .into_result()?;

    Ok(Json(notification))
}

/// Returns the router for notifications.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(fetch_notifications))
        .route(
            "/notifications/{notification}/read",
            patch(read_notification),
        )
}
