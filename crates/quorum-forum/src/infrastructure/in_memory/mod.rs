//! In-memory implementations of the Forum repository ports.
//!
//! Rows are stored apart from the aggregates they hydrate, so loading a
//! question or answer always rebuilds its attachment baseline from the link
//! store.

mod answers;
mod comments;
mod files;
mod questions;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quorum_core::dispatcher::EventDispatcher;
use quorum_core::error::DomainError;
use uuid::Uuid;

use crate::application::repositories::{AttachmentsRepository, StudentsRepository};
use crate::domain::entities::Attachment;

pub use answers::InMemoryAnswersRepository;
pub use comments::{InMemoryAnswerCommentsRepository, InMemoryQuestionCommentsRepository};
pub use files::{
    InMemoryAnswerAttachmentsRepository, InMemoryAttachmentsRepository,
    InMemoryQuestionAttachmentsRepository, InMemoryStudentsRepository,
};
pub use questions::InMemoryQuestionsRepository;

/// Display name used when a joined author is no longer stored.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// Locks `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) async fn author_name(
    students: &dyn StudentsRepository,
    author_id: Uuid,
) -> Result<String, DomainError> {
    Ok(students
        .find_by_id(author_id)
        .await?
        .map_or_else(|| UNKNOWN_AUTHOR.to_owned(), |student| student.name))
}

/// Resolves attachment ids, skipping ids with no stored file.
pub(crate) async fn resolve_attachments(
    files: &dyn AttachmentsRepository,
    attachment_ids: &[Uuid],
) -> Result<Vec<Attachment>, DomainError> {
    let mut resolved = Vec::new();
    for &attachment_id in attachment_ids {
        if let Some(attachment) = files.find_by_id(attachment_id).await? {
            resolved.push(attachment);
        }
    }
    Ok(resolved)
}

/// Every Forum adapter wired together around one dispatcher.
#[derive(Clone)]
pub struct InMemoryForum {
    pub students: Arc<InMemoryStudentsRepository>,
    pub attachments: Arc<InMemoryAttachmentsRepository>,
    pub question_attachments: Arc<InMemoryQuestionAttachmentsRepository>,
    pub answer_attachments: Arc<InMemoryAnswerAttachmentsRepository>,
    pub questions: Arc<InMemoryQuestionsRepository>,
    pub answers: Arc<InMemoryAnswersRepository>,
    pub question_comments: Arc<InMemoryQuestionCommentsRepository>,
    pub answer_comments: Arc<InMemoryAnswerCommentsRepository>,
}

impl InMemoryForum {
    /// Creates empty stores. Questions and answers dispatch through
    /// `dispatcher` after every `create` and `save`.
    #[must_use]
    pub fn new(dispatcher: Arc<EventDispatcher>) -> Self {
        let students = Arc::new(InMemoryStudentsRepository::new());
        let attachments = Arc::new(InMemoryAttachmentsRepository::new());
        let question_attachments = Arc::new(InMemoryQuestionAttachmentsRepository::new());
        let answer_attachments = Arc::new(InMemoryAnswerAttachmentsRepository::new());

        let questions = Arc::new(InMemoryQuestionsRepository::new(
            question_attachments.clone(),
            attachments.clone(),
            students.clone(),
            Arc::clone(&dispatcher),
        ));
        let answers = Arc::new(InMemoryAnswersRepository::new(
            answer_attachments.clone(),
            attachments.clone(),
            students.clone(),
            dispatcher,
        ));
        let question_comments = Arc::new(InMemoryQuestionCommentsRepository::new(students.clone()));
        let answer_comments = Arc::new(InMemoryAnswerCommentsRepository::new(students.clone()));

        Self {
            students,
            attachments,
            question_attachments,
            answer_attachments,
            questions,
            answers,
            question_comments,
            answer_comments,
        }
    }
}
