//! Shared application state.

use std::sync::Arc;

use quorum_core::clock::Clock;
use quorum_core::dispatcher::EventDispatcher;
use quorum_forum::application::repositories::{
    AnswerCommentsRepository, AnswersRepository, AttachmentsRepository,
    QuestionCommentsRepository, QuestionsRepository, StudentsRepository,
};
use quorum_forum::infrastructure::in_memory::InMemoryForum;
use quorum_notification::application::repositories::NotificationsRepository;
use quorum_notification::application::subscribers::register_subscribers;
use quorum_notification::infrastructure::in_memory::InMemoryNotificationsRepository;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for timestamps.
    pub clock: Arc<dyn Clock>,
    /// Dispatcher the stores publish domain events through.
    pub dispatcher: Arc<EventDispatcher>,
    pub students: Arc<dyn StudentsRepository>,
    pub attachments: Arc<dyn AttachmentsRepository>,
    pub questions: Arc<dyn QuestionsRepository>,
    pub answers: Arc<dyn AnswersRepository>,
    pub question_comments: Arc<dyn QuestionCommentsRepository>,
    pub answer_comments: Arc<dyn AnswerCommentsRepository>,
    pub notifications: Arc<dyn NotificationsRepository>,
}

impl AppState {
    /// Wires in-memory stores around a fresh dispatcher and subscribes the
    /// notification handlers to forum events.
    #[must_use]
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        let dispatcher = Arc::new(EventDispatcher::new());
        let forum = InMemoryForum::new(Arc::clone(&dispatcher));

        let questions: Arc<dyn QuestionsRepository> = forum.questions;
        let answers: Arc<dyn AnswersRepository> = forum.answers;
        let notifications: Arc<dyn NotificationsRepository> =
            Arc::new(InMemoryNotificationsRepository::new());
        register_subscribers(&dispatcher, &questions, &answers, &notifications, &clock);

        Self {
            clock,
            dispatcher,
            students: forum.students,
            attachments: forum.attachments,
            questions,
            answers,
            question_comments: forum.question_comments,
            answer_comments: forum.answer_comments,
            notifications,
        }
    }
}
