//! Attachment metadata registration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};

use quorum_forum::application::command_handlers;
use quorum_forum::domain::commands;
use quorum_forum::domain::entities::Attachment;

use crate::actor::Actor;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /attachments.
#[derive(Debug, Deserialize)]
pub struct CreateAttachmentRequest {
    pub title: String,
    pub url: String,
}

/// POST /attachments
#[instrument(skip(state, actor, request), fields(actor_id = %actor.0))]
async fn create_attachment(
    State(state): State<AppState>,
    actor: Actor,
    Json(request): Json<CreateAttachmentRequest>,
) -> Result<(StatusCode, Json<Attachment>), ApiError> {
    let command = commands::CreateAttachment {
        title: request.title,
        url: request.url,
    };

    info!("handling create_attachment command");

    let attachment = command_handlers::handle_create_attachment(&command, &*state.attachments)
        .await?
        .into_result()?;

    Ok((StatusCode::CREATED, Json(attachment)))
}

/// Returns the router for attachments.
pub fn router() -> Router<AppState> {
    Router::new().route("/attachments", post(create_attachment))
}
