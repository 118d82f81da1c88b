//! In-memory comment stores.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quorum_core::error::DomainError;
use quorum_core::pagination::PaginationParams;
use uuid::Uuid;

use super::{author_name, lock};
use crate::application::repositories::{
    AnswerCommentsRepository, QuestionCommentsRepository, StudentsRepository,
};
use crate::domain::entities::{AnswerComment, QuestionComment};
use crate::domain::read_models::CommentWithAuthor;

/// In-memory `QuestionCommentsRepository`.
pub struct InMemoryQuestionCommentsRepository {
    comments: Mutex<Vec<QuestionComment>>,
    students: Arc<dyn StudentsRepository>,
}

impl InMemoryQuestionCommentsRepository {
    #[must_use]
    pub fn new(students: Arc<dyn StudentsRepository>) -> Self {
        Self {
            comments: Mutex::new(Vec::new()),
            students,
        }
    }
}

#[async_trait]
impl QuestionCommentsRepository for InMemoryQuestionCommentsRepository {
    async fn find_by_id(&self, comment_id: Uuid) -> Result<Option<QuestionComment>, DomainError> {
        Ok(lock(&self.comments)
            .iter()
            .find(|comment| comment.id == comment_id)
            .cloned())
    }

    async fn find_many_with_author(
        &self,
        question_id: Uuid,
        params: PaginationParams,
    ) -> Result<Vec<CommentWithAuthor>, DomainError> {
        let mut matching: Vec<QuestionComment> = lock(&self.comments)
            .iter()
            .filter(|comment| comment.question_id == question_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut page = Vec::new();
        for comment in params.slice(&matching) {
            page.push(CommentWithAuthor {
                comment_id: comment.id,
                author_id: comment.author_id,
                author_name: author_name(&*self.students, comment.author_id).await?,
                content: comment.content.clone(),
                created_at: comment.created_at,
                updated_at: comment.updated_at,
            });
        }
        Ok(page)
    }

    async fn create(&self, comment: &QuestionComment) -> Result<(), DomainError> {
        lock(&self.comments).push(comment.clone());
        Ok(())
    }

    async fn delete(&self, comment: &QuestionComment) -> Result<(), DomainError> {
        lock(&self.comments).retain(|stored| stored.id != comment.id);
        Ok(())
    }
}

/// In-memory `AnswerCommentsRepository`.
pub struct InMemoryAnswerCommentsRepository {
    comments: Mutex<Vec<AnswerComment>>,
    students: Arc<dyn StudentsRepository>,
}

impl InMemoryAnswerCommentsRepository {
    #[must_use]
    pub fn new(students: Arc<dyn StudentsRepository>) -> Self {
        Self {
            comments: Mutex::new(Vec::new()),
            students,
        }
    }
}

#[async_trait]
impl AnswerCommentsRepository for InMemoryAnswerCommentsRepository {
    async fn find_by_id(&self, comment_id: Uuid) -> Result<Option<AnswerComment>, DomainError> {
        Ok(lock(&self.comments)
            .iter()
            .find(|comment| comment.id == comment_id)
            .cloned())
    }

    async fn find_many_with_author(
        &self,
        answer_id: Uuid,
        params: PaginationParams,
    ) -> Result<Vec<CommentWithAuthor>, DomainError> {
        let mut matching: Vec<AnswerComment> = lock(&self.comments)
            .iter()
            .filter(|comment| comment.answer_id == answer_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut page = Vec::new();
        for comment in params.slice(&matching) {
            page.push(CommentWithAuthor {
                comment_id: comment.id,
                author_id: comment.author_id,
                author_name: author_name(&*self.students, comment.author_id).await?,
                content: comment.content.clone(),
                created_at: comment.created_at,
                updated_at: comment.updated_at,
            });
        }
        Ok(page)
    }

    async fn create(&self, comment: &AnswerComment) -> Result<(), DomainError> {
        lock(&self.comments).push(comment.clone());
        Ok(())
    }

    async fn delete(&self, comment: &AnswerComment) -> Result<(), DomainError> {
        lock(&self.comments).retain(|stored| stored.id != comment.id);
        Ok(())
    }
}
