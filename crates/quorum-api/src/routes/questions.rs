//! Routes for questions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use chrono::{DateTime, Utc};
use quorum_core::pagination::PaginationParams;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use quorum_forum::application::{command_handlers, query_handlers};
use quorum_forum::domain::aggregates::Question;
use quorum_forum::domain::commands;
use quorum_forum::domain::read_models::{QuestionDetails, QuestionSummary};

use crate::actor::Actor;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating or editing a question.
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub title: String,
    pub content: String,
    /// Full set of linked attachments.
    #[serde(default)]
    pub attachment_ids: Vec<Uuid>,
}

/// A question as returned by write endpoints.
#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub question_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub best_answer_id: Option<Uuid>,
    pub attachment_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Question> for QuestionResponse {
    fn from(question: &Question) -> Self {
        Self {
            question_id: question.id,
            author_id: question.author_id(),
            title: question.title().to_owned(),
            slug: question.slug().to_string(),
            content: question.content().to_owned(),
            best_answer_id: question.best_answer_id(),
            attachment_ids: question
                .attachments()
                .items()
                .iter()
                .map(|link| link.attachment_id)
                .collect(),
            created_at: question.created_at(),
            updated_at: question.updated_at(),
        }
    }
}

/// POST /questions
#[instrument(skip(state, actor, request), fields(actor_id = %actor.0))]
async fn create_question(
    State(state): State<AppState>,
    actor: Actor,
    Json(request): Json<QuestionRequest>,
) -> Result<(StatusCode, Json<QuestionResponse>), ApiError> {
    let command = commands::CreateQuestion {
        author_id: actor.0,
        title: request.title,
        content: request.content,
        attachment_ids: request.attachment_ids,
    };

    info!("handling create_question command");

    let question =
        command_handlers::handle_create_question(&command, state.clock.as_ref(), &*state.questions)
            .await?
            .into_result()?;

    Ok((StatusCode::CREATED, Json(QuestionResponse::from(&question))))
}

/// GET /questions?page=N
#[instrument(skip(state))]
async fn fetch_recent_questions(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<QuestionSummary>>, ApiError> {
    let questions = query_handlers::fetch_recent_questions(params, &*state.questions)
        .await?
        .into_result()?;
    Ok(Json(questions))
}

/// GET /questions/{slug}
#[instrument(skip(state))]
async fn get_question_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<QuestionDetails>, ApiError> {
    let details = query_handlers::get_question_by_slug(&slug, &*state.questions)
        .await?
        .into_result()?;
    Ok(Json(details))
}

/// PUT /questions/{question_id}
#[instrument(skip(state, actor, request), fields(actor_id = %actor.0))]
async fn edit_question(
    State(state): State<AppState>,
    actor: Actor,
    Path(question_id): Path<Uuid>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let command = commands::EditQuestion {
        question_id,
        author_id: actor.0,
        title: request.title,
        content: request.content,
        attachment_ids: request.attachment_ids,
    };

    info!("handling edit_question command");

    let question =
        command_handlers::handle_edit_question(&command, state.clock.as_ref(), &*state.questions)
            .await?
            .into_result()?;

    Ok(Json(QuestionResponse::from(&question)))
}

/// DELETE /questions/{question_id}
#[instrument(skip(state, actor), fields(actor_id = %actor.0))]
async fn delete_question(
    State(state): State<AppState>,
    actor: Actor,
    Path(question_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteQuestion {
        question_id,
        author_id: actor.0,
    };

    info!("handling delete_question command");

    command_handlers::handle_delete_question(&command, &*state.questions)
        .await?
        .into_result()?;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for questions. `{question}` is a slug on `GET` and an
/// id on `PUT` and `DELETE`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/questions",
            get(fetch_recent_questions).post(create_question),
        )
        .route(
            "/questions/{question}",
            get(get_question_by_slug)
                .put(edit_question)
                .delete(delete_question),
        )
}
