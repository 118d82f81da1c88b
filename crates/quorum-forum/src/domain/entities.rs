//! Entities of the Forum context that are not aggregate roots.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A registered forum member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    /// Student identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact e-mail.
    pub email: String,
}

impl Student {
    /// Creates a student with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// An uploaded file that questions and answers can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// Attachment identifier.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Storage location.
    pub url: String,
}

impl Attachment {
    /// Creates an attachment with a fresh id.
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Link between a question and an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionAttachment {
    /// Owning question.
    pub question_id: Uuid,
    /// Referenced attachment.
    pub attachment_id: Uuid,
}

impl QuestionAttachment {
    /// Identity comparator for change tracking.
    #[must_use]
    pub fn same_attachment(a: &Self, b: &Self) -> bool {
        a.attachment_id == b.attachment_id
    }
}

/// Link between an answer and an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerAttachment {
    /// Owning answer.
    pub answer_id: Uuid,
    /// Referenced attachment.
    pub attachment_id: Uuid,
}

impl AnswerAttachment {
    /// Identity comparator for change tracking.
    #[must_use]
    pub fn same_attachment(a: &Self, b: &Self) -> bool {
        a.attachment_id == b.attachment_id
    }
}

/// A comment left on a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionComment {
    /// Comment identifier.
    pub id: Uuid,
    /// Commenting student.
    pub author_id: Uuid,
    /// Commented question.
    pub question_id: Uuid,
    /// Comment body.
    pub content: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl QuestionComment {
    /// Creates a comment with a fresh id.
    #[must_use]
    pub fn new(
        author_id: Uuid,
        question_id: Uuid,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            question_id,
            content: content.into(),
            created_at,
            updated_at: None,
        }
    }
}

/// A comment left on an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerComment {
    /// Comment identifier.
    pub id: Uuid,
    /// Commenting student.
    pub author_id: Uuid,
    /// Commented answer.
    pub answer_id: Uuid,
    /// Comment body.
    pub content: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl AnswerComment {
    /// Creates a comment with a fresh id.
    #[must_use]
    pub fn new(
        author_id: Uuid,
        answer_id: Uuid,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            answer_id,
            content: content.into(),
            created_at,
            updated_at: None,
        }
    }
}
