//! Students, attachment files, and attachment link stores.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use quorum_core::error::DomainError;
use uuid::Uuid;

use super::lock;
use crate::application::repositories::{
    AnswerAttachmentsRepository, AttachmentsRepository, QuestionAttachmentsRepository,
    StudentsRepository,
};
use crate::domain::entities::{AnswerAttachment, Attachment, QuestionAttachment, Student};

/// In-memory student directory.
#[derive(Debug, Default)]
pub struct InMemoryStudentsRepository {
    students: Mutex<HashMap<Uuid, Student>>,
}

impl InMemoryStudentsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentsRepository for InMemoryStudentsRepository {
    async fn find_by_id(&self, student_id: Uuid) -> Result<Option<Student>, DomainError> {
        Ok(lock(&self.students).get(&student_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, DomainError> {
        Ok(lock(&self.students)
            .values()
            .find(|student| student.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, student: &Student) -> Result<(), DomainError> {
        lock(&self.students).insert(student.id, student.clone());
        Ok(())
    }
}

/// In-memory attachment file metadata.
#[derive(Debug, Default)]
pub struct InMemoryAttachmentsRepository {
    attachments: Mutex<HashMap<Uuid, Attachment>>,
}

impl InMemoryAttachmentsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttachmentsRepository for InMemoryAttachmentsRepository {
    async fn find_by_id(&self, attachment_id: Uuid) -> Result<Option<Attachment>, DomainError> {
        Ok(lock(&self.attachments).get(&attachment_id).cloned())
    }

    async fn create(&self, attachment: &Attachment) -> Result<(), DomainError> {
        lock(&self.attachments).insert(attachment.id, attachment.clone());
        Ok(())
    }
}

/// In-memory question ↔ attachment links, kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryQuestionAttachmentsRepository {
    links: Mutex<Vec<QuestionAttachment>>,
}

impl InMemoryQuestionAttachmentsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored link.
    #[must_use]
    pub fn items(&self) -> Vec<QuestionAttachment> {
        lock(&self.links).clone()
    }
}

#[async_trait]
impl QuestionAttachmentsRepository for InMemoryQuestionAttachmentsRepository {
    async fn find_many_by_question_id(
        &self,
        question_id: Uuid,
    ) -> Result<Vec<QuestionAttachment>, DomainError> {
        Ok(lock(&self.links)
            .iter()
            .filter(|link| link.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn create_many(&self, links: &[QuestionAttachment]) -> Result<(), DomainError> {
        let mut stored = lock(&self.links);
        for link in links {
            if !stored.contains(link) {
                stored.push(link.clone());
            }
        }
        Ok(())
    }

    async fn delete_many(&self, links: &[QuestionAttachment]) -> Result<(), DomainError> {
        lock(&self.links).retain(|stored| !links.contains(stored));
        Ok(())
    }

    async fn delete_many_by_question_id(&self, question_id: Uuid) -> Result<(), DomainError> {
        lock(&self.links).retain(|stored| stored.question_id != question_id);
        Ok(())
    }
}

/// In-memory answer ↔ attachment links, kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryAnswerAttachmentsRepository {
    links: Mutex<Vec<AnswerAttachment>>,
}

impl InMemoryAnswerAttachmentsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored link.
    #[must_use]
    pub fn items(&self) -> Vec<AnswerAttachment> {
        lock(&self.links).clone()
    }
}

#[async_trait]
impl AnswerAttachmentsRepository for InMemoryAnswerAttachmentsRepository {
    async fn find_many_by_answer_id(
        &self,
        answer_id: Uuid,
    ) -> Result<Vec<AnswerAttachment>, DomainError> {
        Ok(lock(&self.links)
            .iter()
            .filter(|link| link.answer_id == answer_id)
            .cloned()
            .collect())
    }

    async fn create_many(&self, links: &[AnswerAttachment]) -> Result<(), DomainError> {
        let mut stored = lock(&self.links);
        for link in links {
            if !stored.contains(link) {
                stored.push(link.clone());
            }
        }
        Ok(())
    }

    async fn delete_many(&self, links: &[AnswerAttachment]) -> Result<(), DomainError> {
        lock(&self.links).retain(|stored| !links.contains(stored));
        Ok(())
    }

    async fn delete_many_by_answer_id(&self, answer_id: Uuid) -> Result<(), DomainError> {
        lock(&self.links).retain(|stored| stored.answer_id != answer_id);
        Ok(())
    }
}
