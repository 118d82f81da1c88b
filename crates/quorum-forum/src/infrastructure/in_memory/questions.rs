//! In-memory question store.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quorum_core::aggregate::PendingEvents;
use quorum_core::dispatcher::EventDispatcher;
use quorum_core::error::DomainError;
use quorum_core::pagination::PaginationParams;
use quorum_core::watched_list::WatchedList;
use tracing::debug;
use uuid::Uuid;

use super::{author_name, lock, resolve_attachments};
use crate::application::repositories::{
    AttachmentsRepository, QuestionAttachmentsRepository, QuestionsRepository, StudentsRepository,
};
use crate::domain::aggregates::Question;
use crate::domain::entities::QuestionAttachment;
use crate::domain::read_models::QuestionDetails;
use crate::domain::slug::Slug;

/// Stored question fields, without attachments or pending events.
#[derive(Debug, Clone)]
struct QuestionRow {
    id: Uuid,
    author_id: Uuid,
    best_answer_id: Option<Uuid>,
    title: String,
    slug: Slug,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<&Question> for QuestionRow {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id,
            author_id: question.author_id,
            best_answer_id: question.best_answer_id,
            title: question.title.clone(),
            slug: question.slug.clone(),
            content: question.content.clone(),
            created_at: question.created_at,
            updated_at: question.updated_at,
        }
    }
}

fn slug_taken(slug: &Slug) -> DomainError {
    DomainError::Conflict(format!("slug {slug} is already used by another question"))
}

/// In-memory `QuestionsRepository`. Slugs are unique across stored rows.
pub struct InMemoryQuestionsRepository {
    rows: Mutex<Vec<QuestionRow>>,
    links: Arc<dyn QuestionAttachmentsRepository>,
    files: Arc<dyn AttachmentsRepository>,
    students: Arc<dyn StudentsRepository>,
    dispatcher: Arc<EventDispatcher>,
}

impl InMemoryQuestionsRepository {
    #[must_use]
    pub fn new(
        links: Arc<dyn QuestionAttachmentsRepository>,
        files: Arc<dyn AttachmentsRepository>,
        students: Arc<dyn StudentsRepository>,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            links,
            files,
            students,
            dispatcher,
        }
    }

    /// Snapshot of every stored question, hydrated without attachments.
    #[must_use]
    pub fn items(&self) -> Vec<Question> {
        lock(&self.rows)
            .iter()
            .cloned()
            .map(|row| Self::assemble(row, Vec::new()))
            .collect()
    }

    fn assemble(row: QuestionRow, links: Vec<QuestionAttachment>) -> Question {
        Question {
            id: row.id,
            author_id: row.author_id,
            best_answer_id: row.best_answer_id,
            title: row.title,
            slug: row.slug,
            content: row.content,
            attachments: WatchedList::new(links, QuestionAttachment::same_attachment),
            created_at: row.created_at,
            updated_at: row.updated_at,
            events: PendingEvents::new(),
        }
    }

    async fn hydrate(&self, row: QuestionRow) -> Result<Question, DomainError> {
        let links = self.links.find_many_by_question_id(row.id).await?;
        Ok(Self::assemble(row, links))
    }

    fn row_by_slug(&self, slug: &str) -> Option<QuestionRow> {
        lock(&self.rows)
            .iter()
            .find(|row| row.slug.as_str() == slug)
            .cloned()
    }

    async fn publish(&self, question: &mut Question) -> Result<(), DomainError> {
        self.dispatcher.mark_pending(question);
        self.dispatcher.dispatch(question.id).await?;
        Ok(())
    }
}

#[async_trait]
impl QuestionsRepository for InMemoryQuestionsRepository {
    async fn find_by_id(&self, question_id: Uuid) -> Result<Option<Question>, DomainError> {
        let row = lock(&self.rows)
            .iter()
            .find(|row| row.id == question_id)
            .cloned();
        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Question>, DomainError> {
        match self.row_by_slug(slug) {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_details_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<QuestionDetails>, DomainError> {
        let Some(row) = self.row_by_slug(slug) else {
            return Ok(None);
        };
        let attachment_ids: Vec<Uuid> = self
            .links
            .find_many_by_question_id(row.id)
            .await?
            .iter()
            .map(|link| link.attachment_id)
            .collect();

        Ok(Some(QuestionDetails {
            question_id: row.id,
            author_id: row.author_id,
            author_name: author_name(&*self.students, row.author_id).await?,
            title: row.title,
            slug: row.slug,
            content: row.content,
            best_answer_id: row.best_answer_id,
            attachments: resolve_attachments(&*self.files, &attachment_ids).await?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }

    async fn find_many_recent(
        &self,
        params: PaginationParams,
    ) -> Result<Vec<Question>, DomainError> {
        let mut rows = lock(&self.rows).clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut page = Vec::new();
        for row in params.slice(&rows) {
            page.push(self.hydrate(row.clone()).await?);
        }
        Ok(page)
    }

    async fn create(&self, question: &mut Question) -> Result<(), DomainError> {
        {
            let mut rows = lock(&self.rows);
            if rows.iter().any(|row| row.slug == question.slug) {
                return Err(slug_taken(&question.slug));
            }
            rows.push(QuestionRow::from(&*question));
        }
        self.links.create_many(question.attachments.items()).await?;

        debug!(question_id = %question.id, attachments = question.attachments.len(), "question stored");
        self.publish(question).await
    }

    async fn save(&self, question: &mut Question) -> Result<(), DomainError> {
        let stored = {
            let mut rows = lock(&self.rows);
            if rows
                .iter()
                .any(|row| row.id != question.id && row.slug == question.slug)
            {
                return Err(slug_taken(&question.slug));
            }
            match rows.iter_mut().find(|row| row.id == question.id) {
                Some(row) => {
                    *row = QuestionRow::from(&*question);
                    true
                }
                None => false,
            }
        };
        if !stored {
            return Err(DomainError::Infrastructure(format!(
                "question {} is not stored",
                question.id
            )));
        }

        let added = question.attachments.new_items();
        let removed = question.attachments.removed_items();
        self.links.create_many(&added).await?;
        self.links.delete_many(&removed).await?;

        debug!(
            question_id = %question.id,
            added = added.len(),
            removed = removed.len(),
            "question saved"
        );
        self.publish(question).await
    }

    async fn delete(&self, question: &Question) -> Result<(), DomainError> {
        lock(&self.rows).retain(|row| row.id != question.id);
        self.links.delete_many_by_question_id(question.id).await?;

        debug!(question_id = %question.id, "question removed");
        Ok(())
    }
}
