//! Domain events for the Forum context.

use quorum_core::event::DomainEvent;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag of [`AnswerCreated`].
pub const ANSWER_CREATED_EVENT_TYPE: &str = "forum.answer_created";
/// Tag of [`QuestionBestAnswerChosen`].
pub const QUESTION_BEST_ANSWER_CHOSEN_EVENT_TYPE: &str = "forum.question_best_answer_chosen";

/// Emitted when a student answers a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerCreated {
    /// The new answer.
    pub answer_id: Uuid,
    /// The answered question.
    pub question_id: Uuid,
    /// The answering student.
    pub author_id: Uuid,
    /// Short preview of the answer body.
    pub excerpt: String,
}

impl DomainEvent for AnswerCreated {
    const EVENT_TYPE: &'static str = ANSWER_CREATED_EVENT_TYPE;
}

/// Emitted when a question's author picks a best answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBestAnswerChosen {
    /// The question.
    pub question_id: Uuid,
    /// The chosen answer.
    pub best_answer_id: Uuid,
}

impl DomainEvent for QuestionBestAnswerChosen {
    const EVENT_TYPE: &'static str = QUESTION_BEST_ANSWER_CHOSEN_EVENT_TYPE;
}
