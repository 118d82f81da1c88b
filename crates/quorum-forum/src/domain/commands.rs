//! Commands for the Forum context.
//!
//! `author_id` on every command is the acting student; ownership checks
//! compare it with the target's author.

use uuid::Uuid;

/// Command to open a new question.
#[derive(Debug, Clone)]
pub struct CreateQuestion {
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub attachment_ids: Vec<Uuid>,
}

/// Command to edit a question. `attachment_ids` is the full desired set.
#[derive(Debug, Clone)]
pub struct EditQuestion {
    pub question_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub attachment_ids: Vec<Uuid>,
}

/// Command to delete a question.
#[derive(Debug, Clone)]
pub struct DeleteQuestion {
    pub question_id: Uuid,
    pub author_id: Uuid,
}

/// Command to answer a question.
#[derive(Debug, Clone)]
pub struct AnswerQuestion {
    pub question_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub attachment_ids: Vec<Uuid>,
}

/// Command to edit an answer. `attachment_ids` is the full desired set.
#[derive(Debug, Clone)]
pub struct EditAnswer {
    pub answer_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub attachment_ids: Vec<Uuid>,
}

/// Command to delete an answer.
#[derive(Debug, Clone)]
pub struct DeleteAnswer {
    pub answer_id: Uuid,
    pub author_id: Uuid,
}

/// Command to mark an answer as the best one for its question. Only the
/// question's author may issue it.
#[derive(Debug, Clone)]
pub struct ChooseQuestionBestAnswer {
    pub answer_id: Uuid,
    pub author_id: Uuid,
}

/// Command to comment on a question.
#[derive(Debug, Clone)]
pub struct CommentOnQuestion {
    pub question_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
}

/// Command to comment on an answer.
#[derive(Debug, Clone)]
pub struct CommentOnAnswer {
    pub answer_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
}

/// Command to delete a question comment.
#[derive(Debug, Clone)]
pub struct DeleteQuestionComment {
    pub comment_id: Uuid,
    pub author_id: Uuid,
}

/// Command to delete an answer comment.
#[derive(Debug, Clone)]
pub struct DeleteAnswerComment {
    pub comment_id: Uuid,
    pub author_id: Uuid,
}

/// Command to register a student.
#[derive(Debug, Clone)]
pub struct RegisterStudent {
    pub name: String,
    pub email: String,
}

/// Command to record an uploaded attachment's metadata.
#[derive(Debug, Clone)]
pub struct CreateAttachment {
    pub title: String,
    pub url: String,
}
