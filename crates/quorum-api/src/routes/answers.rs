//! Routes for answers and best-answer selection.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::patch, routing::put};
use quorum_core::pagination::PaginationParams;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use quorum_forum::application::{command_handlers, query_handlers};
use quorum_forum::domain::commands;
use quorum_forum::domain::read_models::{AnswerSummary, AnswerWithAuthor};

use crate::actor::Actor;
use crate::error::ApiError;
use crate::routes::questions::QuestionResponse;
use crate::state::AppState;

/// Request body for answering a question or editing an answer.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub content: String,
    /// Full set of linked attachments.
    #[serde(default)]
    pub attachment_ids: Vec<Uuid>,
}

/// POST /questions/{question_id}/answers
#[instrument(skip(state, actor, request), fields(actor_id = %actor.0))]
async fn answer_question(
    State(state): State<AppState>,
    actor: Actor,
    Path(question_id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<(StatusCode, Json<AnswerSummary>), ApiError> {
    let command = commands::AnswerQuestion {
        question_id,
        author_id: actor.0,
        content: request.content,
        attachment_ids: request.attachment_ids,
    };

    info!("handling answer_question command");

    let answer = command_handlers::handle_answer_question(
        &command,
        state.clock.as_ref(),
        &*state.questions,
        &*state.answers,
    )
    .await?
    .into_result()?;

    Ok((StatusCode::CREATED, Json(AnswerSummary::from(&answer))))
}

/// GET /questions/{question_id}/answers?page=N
#[instrument(skip(state))]
async fn fetch_question_answers(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<AnswerWithAuthor>>, ApiError> {
    let answers = query_handlers::fetch_question_answers(question_id, params, &*state.answers)
        .await?
        .into_result()?;
    Ok(Json(answers))
}

/// PUT /answers/{answer_id}
#[instrument(skip(state, actor, request), fields(actor_id = %actor.0))]
async fn edit_answer(
    State(state): State<AppState>,
    actor: Actor,
    Path(answer_id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerSummary>, ApiError> {
    let command = commands::EditAnswer {
        answer_id,
        author_id: actor.0,
        content: request.content,
        attachment_ids: request.attachment_ids,
    };

    info!("handling edit_answer command");

    let answer =
        command_handlers::handle_edit_answer(&command, state.clock.as_ref(), &*state.answers)
            .await?
            .into_result()?;

    Ok(Json(AnswerSummary::from(&answer)))
}

/// DELETE /answers/{answer_id}
#[instrument(skip(state, actor), fields(actor_id = %actor.0))]
async fn delete_answer(
    State(state): State<AppState>,
    actor: Actor,
    Path(answer_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteAnswer {
        answer_id,
        author_id: actor.0,
    };

    info!("handling delete_answer command");

    command_handlers::handle_delete_answer(&command, &*state.answers)
        .await?
        .into_result()?;

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /answers/{answer_id}/choose-as-best
#[instrument(skip(state, actor), fields(actor_id = %actor.0))]
async fn choose_best_answer(
    State(state): State<AppState>,
    actor: Actor,
    Path(answer_id): Path<Uuid>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let command = commands::ChooseQuestionBestAnswer {
        answer_id,
        author_id: actor.0,
    };

    info!("handling choose_question_best_answer command");

    let question = command_handlers::handle_choose_question_best_answer(
        &command,
        state.clock.as_ref(),
        &*state.questions,
        &*state.answers,
    )
    .await?
    .into_result()?;

    Ok(Json(QuestionResponse::from(&question)))
}

/// Returns the router for answers.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/questions/{question}/answers",
            get(fetch_question_answers).post(answer_question),
        )
        .route("/answers/{answer}", put(edit_answer).delete(delete_answer))
        .route("/answers/{answer}/choose-as-best", patch(choose_best_answer))
}
