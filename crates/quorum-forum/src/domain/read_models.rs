//! Read-only projections joined with author and attachment data.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::aggregates::{Answer, Question};
use super::entities::Attachment;
use super::slug::Slug;

/// A question with its author's name and resolved attachments.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionDetails {
    pub question_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub title: String,
    pub slug: Slug,
    pub content: String,
    pub best_answer_id: Option<Uuid>,
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// List entry for a question.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionSummary {
    pub question_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: Slug,
    pub best_answer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Question> for QuestionSummary {
    fn from(question: &Question) -> Self {
        Self {
            question_id: question.id,
            author_id: question.author_id,
            title: question.title.clone(),
            slug: question.slug.clone(),
            best_answer_id: question.best_answer_id,
            created_at: question.created_at,
            updated_at: question.updated_at,
        }
    }
}

/// List entry for an answer, without author data.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerSummary {
    pub answer_id: Uuid,
    pub question_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub attachment_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Answer> for AnswerSummary {
    fn from(answer: &Answer) -> Self {
        Self {
            answer_id: answer.id,
            question_id: answer.question_id,
            author_id: answer.author_id,
            content: answer.content.clone(),
            attachment_ids: answer
                .attachments
                .items()
                .iter()
                .map(|a| a.attachment_id)
                .collect(),
            created_at: answer.created_at,
            updated_at: answer.updated_at,
        }
    }
}

/// An answer with its author's name and resolved attachments.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerWithAuthor {
    pub answer_id: Uuid,
    pub question_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A question or answer comment with its author's name.
#[derive(Debug, Clone, Serialize)]
pub struct CommentWithAuthor {
    pub comment_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
