//! Routes for question and answer comments.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::delete, routing::get};
use chrono::{DateTime, Utc};
use quorum_core::pagination::PaginationParams;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use quorum_forum::application::{command_handlers, query_handlers};
use quorum_forum::domain::commands;
use quorum_forum::domain::entities::{AnswerComment, QuestionComment};
use quorum_forum::domain::read_models::CommentWithAuthor;

use crate::actor::Actor;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST .../comments.
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

/// A comment as returned by write endpoints. `parent_id` is the commented
/// question or answer.
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub comment_id: Uuid,
    pub parent_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<QuestionComment> for CommentResponse {
    fn from(comment: QuestionComment) -> Self {
        Self {
            comment_id: comment.id,
            parent_id: comment.question_id,
            author_id: comment.author_id,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

impl From<AnswerComment> for CommentResponse {
    fn from(comment: AnswerComment) -> Self {
        Self {
            comment_id: comment.id,
            parent_id: comment.answer_id,
            author_id: comment.author_id,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

/// POST /questions/{question_id}/comments
#[instrument(skip(state, actor, request), fields(actor_id = %actor.0))]
async fn comment_on_question(
    State(state): State<AppState>,
    actor: Actor,
    Path(question_id): Path<Uuid>,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let command = commands::CommentOnQuestion {
        question_id,
        author_id: actor.0,
        content: request.content,
    };

    info!("handling comment_on_question command");

    let comment = command_handlers::handle_comment_on_question(
        &command,
        state.clock.as_ref(),
        &*state.questions,
        &*state.question_comments,
    )
    .await?
    .into_result()?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// GET /questions/{question_id}/comments?page=N
#[instrument(skip(state))]
async fn fetch_question_comments(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<CommentWithAuthor>>, ApiError> {
    let comments =
        query_handlers::fetch_question_comments(question_id, params, &*state.question_comments)
            .await?
            .into_result()?;
    Ok(Json(comments))
}

/// DELETE /question-comments/{comment_id}
#[instrument(skip(state, actor), fields(actor_id = %actor.0))]
async fn delete_question_comment(
    State(state): State<AppState>,
    actor: Actor,
    Path(comment_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteQuestionComment {
        comment_id,
        author_id: actor.0,
    };

    info!("handling delete_question_comment command");

    command_handlers::handle_delete_question_comment(&command, &*state.question_comments)
        .await?
        .into_result()?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /answers/{answer_id}/comments
#[instrument(skip(state, actor, request), fields(actor_id = %actor.0))]
async fn comment_on_answer(
    State(state): State<AppState>,
    actor: Actor,
    Path(answer_id): Path<Uuid>,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let command = commands::CommentOnAnswer {
        answer_id,
        author_id: actor.0,
        content: request.content,
    };

    info!("handling comment_on_answer command");

    let comment = command_handlers::handle_comment_on_answer(
        &command,
        state.clock.as_ref(),
        &*state.answers,
        &*state.answer_comments,
    )
    .await?
    .into_result()?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// GET /answers/{answer_id}/comments?page=N
#[instrument(skip(state))]
async fn fetch_answer_comments(
    State(state): State<AppState>,
    Path(answer_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<CommentWithAuthor>>, ApiError> {
    let comments = query_handlers::fetch_answer_comments(answer_id, params, &*state.answer_comments)
        .await?
        .into_result()?;
    Ok(Json(comments))
}

/// DELETE /answer-comments/{comment_id}
#[instrument(skip(state, actor), fields(actor_id = %actor.0))]
async fn delete_answer_comment(
    State(state): State<AppState>,
    actor: Actor,
    Path(comment_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteAnswerComment {
        comment_id,
        author_id: actor.0,
    };

    info!("handling delete_answer_comment command");

    command_handlers::handle_delete_answer_comment(&command, &*state.answer_comments)
        .await?
        .into_result()?;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for comments.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/questions/{question}/comments",
            get(fetch_question_comments).post(comment_on_question),
        )
        .route(
            "/question-comments/{comment}",
            delete(delete_question_comment),
        )
        .route(
            "/answers/{answer}/comments",
            get(fetch_answer_comments).post(comment_on_answer),
        )
        .route("/answer-comments/{comment}", delete(delete_answer_comment))
}
