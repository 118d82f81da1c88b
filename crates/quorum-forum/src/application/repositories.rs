//! Repository ports for the Forum context.
//!
//! Adapters that store aggregates (`QuestionsRepository`,
//! `AnswersRepository`) follow one contract on `create` and `save`:
//!
//! 1. write the aggregate's own fields;
//! 2. insert `attachments().new_items()` (all items on `create`) and delete
//!    `attachments().removed_items()` through the attachment port;
//! 3. hand the pending events to the dispatcher with `mark_pending`, then
//!    call `dispatch` with the aggregate id.
//!
//! A dispatch fault surfaces as `DomainError::Dispatch` after the aggregate
//! has been stored. `delete` cascades to attachment links and never
//! dispatches.

use async_trait::async_trait;
use quorum_core::error::DomainError;
use quorum_core::pagination::PaginationParams;
use uuid::Uuid;

use crate::domain::aggregates::{Answer, Question};
use crate::domain::entities::{
    AnswerAttachment, AnswerComment, Attachment, QuestionAttachment, QuestionComment, Student,
};
use crate::domain::read_models::{AnswerWithAuthor, CommentWithAuthor, QuestionDetails};

/// Storage port for questions.
#[async_trait]
pub trait QuestionsRepository: Send + Sync {
    /// Loads a question with its attachment baseline.
    async fn find_by_id(&self, question_id: Uuid) -> Result<Option<Question>, DomainError>;

    /// Loads a question by slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Question>, DomainError>;

    /// Loads a question by slug joined with author and attachments.
    async fn find_details_by_slug(&self, slug: &str)
    -> Result<Option<QuestionDetails>, DomainError>;

    /// Most recently created questions first.
    async fn find_many_recent(&self, params: PaginationParams)
    -> Result<Vec<Question>, DomainError>;

    /// Stores a new question, its attachments, and dispatches its events.
    async fn create(&self, question: &mut Question) -> Result<(), DomainError>;

    /// Stores changes to a question and its attachments, and dispatches its
    /// events.
    async fn save(&self, question: &mut Question) -> Result<(), DomainError>;

    /// Deletes a question and its attachment links.
    async fn delete(&self, question: &Question) -> Result<(), DomainError>;
}

/// Storage port for answers.
#[async_trait]
pub trait AnswersRepository: Send + Sync {
    /// Loads an answer with its attachment baseline.
    async fn find_by_id(&self, answer_id: Uuid) -> Result<Option<Answer>, DomainError>;

    /// Answers to `question_id`, newest first.
    async fn find_many_by_question_id(
        &self,
        question_id: Uuid,
        params: PaginationParams,
    ) -> Result<Vec<Answer>, DomainError>;

    /// Answers to `question_id` joined with author and attachments, newest
    /// first.
    async fn find_many_with_author(
        &self,
        question_id: Uuid,
        params: PaginationParams,
    ) -> Result<Vec<AnswerWithAuthor>, DomainError>;

    /// Stores a new answer, its attachments, and dispatches its events.
    async fn create(&self, answer: &mut Answer) -> Result<(), DomainError>;

    /// Stores changes to an answer and its attachments, and dispatches its
    /// events.
    async fn save(&self, answer: &mut Answer) -> Result<(), DomainError>;

    /// Deletes an answer and its attachment links.
    async fn delete(&self, answer: &Answer) -> Result<(), DomainError>;
}

/// Storage port for question ↔ attachment links.
#[async_trait]
pub trait QuestionAttachmentsRepository: Send + Sync {
    async fn find_many_by_question_id(
        &self,
        question_id: Uuid,
    ) -> Result<Vec<QuestionAttachment>, DomainError>;

    async fn create_many(&self, links: &[QuestionAttachment]) -> Result<(), DomainError>;

    async fn delete_many(&self, links: &[QuestionAttachment]) -> Result<(), DomainError>;

    async fn delete_many_by_question_id(&self, question_id: Uuid) -> Result<(), DomainError>;
}

/// Storage port for answer ↔ attachment links.
#[async_trait]
pub trait AnswerAttachmentsRepository: Send + Sync {
    async fn find_many_by_answer_id(
        &self,
        answer_id: Uuid,
    ) -> Result<Vec<AnswerAttachment>, DomainError>;

    async fn create_many(&self, links: &[AnswerAttachment]) -> Result<(), DomainError>;

    async fn delete_many(&self, links: &[AnswerAttachment]) -> Result<(), DomainError>;

    async fn delete_many_by_answer_id(&self, answer_id: Uuid) -> Result<(), DomainError>;
}

/// Storage port for question comments.
#[async_trait]
pub trait QuestionCommentsRepository: Send + Sync {
    async fn find_by_id(&self, comment_id: Uuid) -> Result<Option<QuestionComment>, DomainError>;

    /// Comments on `question_id` joined with author, newest first.
    async fn find_many_with_author(
        &self,
        question_id: Uuid,
        params: PaginationParams,
    ) -> Result<Vec<CommentWithAuthor>, DomainError>;

    async fn create(&self, comment: &QuestionComment) -> Result<(), DomainError>;

    async fn delete(&self, comment: &QuestionComment) -> Result<(), DomainError>;
}

/// Storage port for answer comments.
#[async_trait]
pub trait AnswerCommentsRepository: Send + Sync {
    async fn find_by_id(&self, comment_id: Uuid) -> Result<Option<AnswerComment>, DomainError>;

    /// Comments on `answer_id` joined with author, newest first.
    async fn find_many_with_author(
        &self,
        answer_id: Uuid,
        params: PaginationParams,
    ) -> Result<Vec<CommentWithAuthor>, DomainError>;

    async fn create(&self, comment: &AnswerComment) -> Result<(), DomainError>;

    async fn delete(&self, comment: &AnswerComment) -> Result<(), DomainError>;
}

/// Storage port for students.
#[async_trait]
pub trait StudentsRepository: Send + Sync {
    async fn find_by_id(&self, student_id: Uuid) -> Result<Option<Student>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, DomainError>;

    async fn create(&self, student: &Student) -> Result<(), DomainError>;
}

/// Storage port for attachment files.
#[async_trait]
pub trait AttachmentsRepository: Send + Sync {
    async fn find_by_id(&self, attachment_id: Uuid) -> Result<Option<Attachment>, DomainError>;

    async fn create(&self, attachment: &Attachment) -> Result<(), DomainError>;
}
