//! Student registration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};

use quorum_forum::application::command_handlers;
use quorum_forum::domain::commands;
use quorum_forum::domain::entities::Student;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /students.
#[derive(Debug, Deserialize)]
pub struct RegisterStudentRequest {
    pub name: String,
    pub email: String,
}

/// POST /students
#[instrument(skip(state, request))]
async fn register_student(
    State(state): State<AppState>,
    Json(request): Json<RegisterStudentRequest>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let command = commands::RegisterStudent {
        name: request.name,
        email: request.email,
    };

    info!("handling register_student command");

    let student = command_handlers::handle_register_student(&command, &*state.students)
        .await?
        .into_result()?;

    Ok((StatusCode::CREATED, Json(student)))
}

/// Returns the router for students.
pub fn router() -> Router<AppState> {
    Router::new().route("/students", post(register_student))
}
