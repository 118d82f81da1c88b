//! Aggregate roots for the Forum context.

use chrono::{DateTime, Utc};
use quorum_core::aggregate::{AggregateRoot, PendingEvents};
use quorum_core::clock::Clock;
use quorum_core::event::EventRecord;
use quorum_core::watched_list::WatchedList;
use uuid::Uuid;

use super::entities::{AnswerAttachment, QuestionAttachment};
use super::events::{AnswerCreated, QuestionBestAnswerChosen};
use super::slug::Slug;

/// Number of characters kept by [`excerpt`].
pub const EXCERPT_LENGTH: usize = 120;

/// First [`EXCERPT_LENGTH`] characters of `content`, followed by `...`.
#[must_use]
pub fn excerpt(content: &str) -> String {
    let head: String = content.chars().take(EXCERPT_LENGTH).collect();
    format!("{}...", head.trim_end())
}

/// The aggregate root for a question.
#[derive(Debug, Clone)]
pub struct Question {
    /// Aggregate identifier.
    pub id: Uuid,
    pub(crate) author_id: Uuid,
    pub(crate) best_answer_id: Option<Uuid>,
    pub(crate) title: String,
    pub(crate) slug: Slug,
    pub(crate) content: String,
    pub(crate) attachments: WatchedList<QuestionAttachment>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
    /// Events recorded since the last hand-off to the dispatcher.
    pub(crate) events: PendingEvents,
}

impl Question {
    /// Creates a new question with no attachments. The slug is derived from
    /// the title.
    #[must_use]
    pub fn new(
        author_id: Uuid,
        title: impl Into<String>,
        content: impl Into<String>,
        clock: &dyn Clock,
    ) -> Self {
        let title = title.into();
        Self {
            id: Uuid::new_v4(),
            author_id,
            best_answer_id: None,
            slug: Slug::from_text(&title),
            title,
            content: content.into(),
            attachments: WatchedList::empty(QuestionAttachment::same_attachment),
            created_at: clock.now(),
            updated_at: None,
            events: PendingEvents::new(),
        }
    }

    /// The asking student.
    #[must_use]
    pub fn author_id(&self) -> Uuid {
        self.author_id
    }

    /// The chosen best answer, if any.
    #[must_use]
    pub fn best_answer_id(&self) -> Option<Uuid> {
        self.best_answer_id
    }

    /// Question title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// URL slug derived from the title.
    #[must_use]
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Question body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Attachment links, with the changes made since the question was loaded.
    #[must_use]
    pub fn attachments(&self) -> &WatchedList<QuestionAttachment> {
        &self.attachments
    }

    /// Creation time.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last change, if any.
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Short preview of the question body.
    #[must_use]
    pub fn excerpt(&self) -> String {
        excerpt(&self.content)
    }

    /// Replaces title and content. The slug follows the new title.
    pub fn edit(&mut self, title: impl Into<String>, content: impl Into<String>, clock: &dyn Clock) {
        self.title = title.into();
        self.slug = Slug::from_text(&self.title);
        self.content = content.into();
        self.touch(clock);
    }

    /// Links an attachment. Linking the same attachment twice is a no-op.
    pub fn attach(&mut self, attachment_id: Uuid) {
        self.attachments.add(QuestionAttachment {
            question_id: self.id,
            attachment_id,
        });
    }

    /// Replaces the full set of linked attachments.
    pub fn replace_attachments(&mut self, attachment_ids: &[Uuid], clock: &dyn Clock) {
        let links = attachment_ids
            .iter()
            .map(|&attachment_id| QuestionAttachment {
                question_id: self.id,
                attachment_id,
            })
            .collect();
        self.attachments.replace_all(links);
        self.touch(clock);
    }

    /// Marks `answer_id` as the best answer. Choosing a different answer than
    /// the current one records `QuestionBestAnswerChosen`.
    pub fn choose_best_answer(&mut self, answer_id: Uuid, clock: &dyn Clock) {
        if self.best_answer_id != Some(answer_id) {
            self.events.record(
                self.id,
                &QuestionBestAnswerChosen {
                    question_id: self.id,
                    best_answer_id: answer_id,
                },
                clock.now(),
            );
        }
        self.best_answer_id = Some(answer_id);
        self.touch(clock);
    }

    fn touch(&mut self, clock: &dyn Clock) {
        self.updated_at = Some(clock.now());
    }
}

impl AggregateRoot for Question {
    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn pending_events(&self) -> &[EventRecord] {
        self.events.as_slice()
    }

    fn take_pending_events(&mut self) -> Vec<EventRecord> {
        self.events.take()
    }
}

/// The aggregate root for an answer.
#[derive(Debug, Clone)]
pub struct Answer {
    /// Aggregate identifier.
    pub id: Uuid,
    pub(crate) author_id: Uuid,
    pub(crate) question_id: Uuid,
    pub(crate) content: String,
    pub(crate) attachments: WatchedList<AnswerAttachment>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
    /// Events recorded since the last hand-off to the dispatcher.
    pub(crate) events: PendingEvents,
}

impl Answer {
    /// Creates a new answer, recording `AnswerCreated`.
    #[must_use]
    pub fn new(
        author_id: Uuid,
        question_id: Uuid,
        content: impl Into<String>,
        clock: &dyn Clock,
    ) -> Self {
        let mut answer = Self {
            id: Uuid::new_v4(),
            author_id,
            question_id,
            content: content.into(),
            attachments: WatchedList::empty(AnswerAttachment::same_attachment),
            created_at: clock.now(),
            updated_at: None,
            events: PendingEvents::new(),
        };
        answer.events.record(
            answer.id,
            &AnswerCreated {
                answer_id: answer.id,
                question_id,
                author_id,
                excerpt: answer.excerpt(),
            },
            answer.created_at,
        );
        answer
    }

    /// The answering student.
    #[must_use]
    pub fn author_id(&self) -> Uuid {
        self.author_id
    }

    /// The answered question.
    #[must_use]
    pub fn question_id(&self) -> Uuid {
        self.question_id
    }

    /// Answer body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Attachment links, with the changes made since the answer was loaded.
    #[must_use]
    pub fn attachments(&self) -> &WatchedList<AnswerAttachment> {
        &self.attachments
    }

    /// Creation time.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last edit, if any.
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Short preview of the answer body.
    #[must_use]
    pub fn excerpt(&self) -> String {
        excerpt(&self.content)
    }

    /// Replaces the answer body.
    pub fn edit(&mut self, content: impl Into<String>, clock: &dyn Clock) {
        self.content = content.into();
        self.updated_at = Some(clock.now());
    }

    /// Links an attachment. Linking the same attachment twice is a no-op.
    pub fn attach(&mut self, attachment_id: Uuid) {
        self.attachments.add(AnswerAttachment {
            answer_id: self.id,
            attachment_id,
        });
    }

    /// Replaces the full set of linked attachments.
    pub fn replace_attachments(&mut self, attachment_ids: &[Uuid], clock: &dyn Clock) {
        let links = attachment_ids
            .iter()
            .map(|&attachment_id| AnswerAttachment {
                answer_id: self.id,
                attachment_id,
            })
            .collect();
        self.attachments.replace_all(links);
        self.updated_at = Some(clock.now());
    }
}

impl AggregateRoot for Answer {
    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn pending_events(&self) -> &[EventRecord] {
        self.events.as_slice()
    }

    fn take_pending_events(&mut self) -> Vec<EventRecord> {
        self.events.take()
    }
}
