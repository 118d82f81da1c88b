//! In-memory answer store.

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
    AnswerAttachmentsRepository, AnswersRepository, AttachmentsRepository, StudentsRepository,
};
use crate::domain::aggregates::Answer;
use crate::domain::entities::AnswerAttachment;
use crate::domain::read_models::AnswerWithAuthor;

#[derive(Debug, Clone)]
struct AnswerRow {
    id: Uuid,
    author_id: Uuid,
    question_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<&Answer> for AnswerRow {
    fn from(answer: &Answer) -> Self {
        Self {
            id: answer.id,
            author_id: answer.author_id,
            question_id: answer.question_id,
            content: answer.content.clone(),
            created_at: answer.created_at,
            updated_at: answer.updated_at,
        }
    }
}

/// In-memory `AnswersRepository`.
pub struct InMemoryAnswersRepository {
    rows: Mutex<Vec<AnswerRow>>,
    links: Arc<dyn AnswerAttachmentsRepository>,
    files: Arc<dyn AttachmentsRepository>,
    students: Arc<dyn StudentsRepository>,
    dispatcher: Arc<EventDispatcher>,
}

impl InMemoryAnswersRepository {
    #[must_use]
    pub fn new(
        links: Arc<dyn AnswerAttachmentsRepository>,
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

    /// Snapshot of every stored answer, hydrated without attachments.
    #[must_use]
    pub fn items(&self) -> Vec<Answer> {
        lock(&self.rows)
            .iter()
            .cloned()
            .map(|row| Self::assemble(row, Vec::new()))
            .collect()
    }

    fn assemble(row: AnswerRow, links: Vec<AnswerAttachment>) -> Answer {
        Answer {
            id: row.id,
            author_id: row.author_id,
            question_id: row.question_id,
            content: row.content,
            attachments: WatchedList::new(links, AnswerAttachment::same_attachment),
            created_at: row.created_at,
            updated_at: row.updated_at,
            events: PendingEvents::new(),
        }
    }

    async fn hydrate(&self, row: AnswerRow) -> Result<Answer, DomainError> {
        let links = self.links.find_many_by_answer_id(row.id).await?;
        Ok(Self::assemble(row, links))
    }

    /// Rows answering `question_id`, newest first, limited to one page.
    fn page_for_question(&self, question_id: Uuid, params: PaginationParams) -> Vec<AnswerRow> {
        let mut rows: Vec<AnswerRow> = lock(&self.rows)
            .iter()
            .filter(|row| row.question_id == question_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        params.slice(&rows).to_vec()
    }

    async fn publish(&self, answer: &mut Answer) -> Result<(), DomainError> {
        self.dispatcher.mark_pending(answer);
        self.dispatcher.dispatch(answer.id).await?;
        Ok(())
    }
}

#[async_trait]
impl AnswersRepository for InMemoryAnswersRepository {
    async fn find_by_id(&self, answer_id: Uuid) -> Result<Option<Answer>, DomainError> {
        let row = lock(&self.rows)
            .iter()
            .find(|row| row.id == answer_id)
            .cloned();
        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_many_by_question_id(
        &self,
        question_id: Uuid,
        params: PaginationParams,
    ) -> Result<Vec<Answer>, DomainError> {
        let mut page = Vec::new();
        for row in self.page_for_question(question_id, params) {
            page.push(self.hydrate(row).await?);
        }
        Ok(page)
    }

    async fn find_many_with_author(
        &self,
        question_id: Uuid,
        params: PaginationParams,
    ) -> Result<Vec<AnswerWithAuthor>, DomainError> {
        let mut page = Vec::new();
        for row in self.page_for_question(question_id, params) {
            let attachment_ids: Vec<Uuid> = self
                .links
                .find_many_by_answer_id(row.id)
                .await?
                .iter()
                .map(|link| link.attachment_id)
                .collect();
            page.push(AnswerWithAuthor {
                answer_id: row.id,
                question_id: row.question_id,
                author_id: row.author_id,
                author_name: author_name(&*self.students, row.author_id).await?,
                content: row.content,
                attachments: resolve_attachments(&*self.files, &attachment_ids).await?,
                created_at: row.created_at,
                updated_at: row.updated_at,
            });
        }
        Ok(page)
    }

    async fn create(&self, answer: &mut Answer) -> Result<(), DomainError> {
        lock(&self.rows).push(AnswerRow::from(&*answer));
        self.links.create_many(answer.attachments.items()).await?;

        debug!(answer_id = %answer.id, attachments = answer.attachments.len(), "answer stored");
        self.publish(answer).await
    }

    async fn save(&self, answer: &mut Answer) -> Result<(), DomainError> {
        let stored = {
            let mut rows = lock(&self.rows);
            match rows.iter_mut().find(|row| row.id == answer.id) {
                Some(row) => {
                    *row = AnswerRow::from(&*answer);
                    true
                }
                None => false,
            }
        };
        if !stored {
            return Err(DomainError::Infrastructure(format!(
                "answer {} is not stored",
                answer.id
            )));
        }

        let added = answer.attachments.new_items();
        let removed = answer.attachments.removed_items();
        self.links.create_many(&added).await?;
        self.links.delete_many(&removed).await?;

        debug!(
            answer_id = %answer.id,
            added = added.len(),
            removed = removed.len(),
            "answer saved"
        );
        self.publish(answer).await
    }

    async fn delete(&self, answer: &Answer) -> Result<(), DomainError> {
        lock(&self.rows).retain(|row| row.id != answer.id);
        self.links.delete_many_by_answer_id(answer.id).await?;

        debug!(answer_id = %answer.id, "answer removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quorum_core::aggregate::AggregateRoot;
    use quorum_test_support::{FailingHandler, FixedClock, RecordingHandler};

    use super::*;
    use crate::domain::events::ANSWER_CREATED_EVENT_TYPE;
    use crate::infrastructure::in_memory::InMemoryForum;

    #[tokio::test]
    async fn test_create_dispatches_answer_created_once() {
        // Arrange
        let dispatcher = Arc::new(EventDispatcher::new());
        let recorder = Arc::new(RecordingHandler::new("recorder"));
        dispatcher.register(ANSWER_CREATED_EVENT_TYPE, recorder.clone());
        let forum = InMemoryForum::new(Arc::clone(&dispatcher));
        let mut answer = Answer::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Body",
            &FixedClock::default_instant(),
        );

        // Act
        forum.answers.create(&mut answer).await.unwrap();
        forum.answers.save(&mut answer).await.unwrap();

        // Assert
        assert_eq!(recorder.aggregate_ids(), vec![answer.id]);
        assert!(answer.pending_events().is_empty());
    }

    #[tokio::test]
    async fn test_create_keeps_answer_stored_when_subscriber_fails() {
        // Arrange
        let dispatcher = Arc::new(EventDispatcher::new());
        dispatcher.register(ANSWER_CREATED_EVENT_TYPE, Arc::new(FailingHandler));
        let forum = InMemoryForum::new(Arc::clone(&dispatcher));
        let mut answer = Answer::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Body",
            &FixedClock::default_instant(),
        );

        // Act
        let result = forum.answers.create(&mut answer).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Dispatch { .. })));
        assert!(forum.answers.find_by_id(answer.id).await.unwrap().is_some());
        assert_eq!(dispatcher.pending_events(answer.id).len(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_attachment_links() {
        // Arrange
        let forum = InMemoryForum::new(Arc::new(EventDispatcher::new()));
        let mut answer = Answer::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Body",
            &FixedClock::default_instant(),
        );
        answer.attach(Uuid::new_v4());
        forum.answers.create(&mut answer).await.unwrap();

        // Act
        forum.answers.delete(&answer).await.unwrap();

        // Assert
        assert!(forum.answers.items().is_empty());
        assert!(forum.answer_attachments.items().is_empty());
    }
}
