//! Subscribers turning forum events into notifications.

use std::sync::Arc;

use async_trait::async_trait;
use quorum_core::clock::Clock;
use quorum_core::dispatcher::{EventDispatcher, EventHandler};
use quorum_core::error::DomainError;
use quorum_core::event::EventRecord;
use quorum_core::outcome::Outcome;
use quorum_forum::application::repositories::{AnswersRepository, QuestionsRepository};
use quorum_forum::domain::events::{
    ANSWER_CREATED_EVENT_TYPE, AnswerCreated, QUESTION_BEST_ANSWER_CHOSEN_EVENT_TYPE,
    QuestionBestAnswerChosen,
};
use tracing::{debug, warn};

use crate::application::command_handlers::handle_send_notification;
use crate::application::repositories::NotificationsRepository;
use crate::domain::commands::SendNotification;

/// Title shown for the best-answer notification.
pub const BEST_ANSWER_TITLE: &str = "Your answer was chosen!";

/// First `limit` characters of `text` followed by `...`.
fn shorten(text: &str, limit: usize) -> String {
    let head: String = text.chars().take(limit).collect();
    format!("{head}...")
}

async fn send(
    command: SendNotification,
    clock: &dyn Clock,
    notifications: &dyn NotificationsRepository,
) -> Result<(), DomainError> {
    if let Outcome::Failure(failure) =
        handle_send_notification(&command, clock, notifications).await?
    {
        warn!(recipient_id = %command.recipient_id, %failure, "notification rejected");
    }
    Ok(())
}

/// Notifies a question's author when the question receives an answer.
pub struct OnAnswerCreated {
    questions: Arc<dyn QuestionsRepository>,
    notifications: Arc<dyn NotificationsRepository>,
    clock: Arc<dyn Clock>,
}

impl OnAnswerCreated {
    #[must_use]
    pub fn new(
        questions: Arc<dyn QuestionsRepository>,
        notifications: Arc<dyn NotificationsRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            questions,
            notifications,
            clock,
        }
    }
}

#[async_trait]
impl EventHandler for OnAnswerCreated {
    fn name(&self) -> &str {
        "notification.on_answer_created"
    }

    async fn handle(&self, event: &EventRecord) -> Result<(), DomainError> {
        let payload: AnswerCreated = event.decode()?;
        let Some(question) = self.questions.find_by_id(payload.question_id).await? else {
            debug!(question_id = %payload.question_id, "answered question is gone, skipping");
            return Ok(());
        };

        let command = SendNotification {
            recipient_id: question.author_id(),
            title: format!("New answer on \"{}\"", shorten(question.title(), 40)),
            content: payload.excerpt,
        };
        send(command, &*self.clock, &*self.notifications).await
    }
}

/// Notifies an answer's author when the answer is chosen as best.
pub struct OnQuestionBestAnswerChosen {
    questions: Arc<dyn QuestionsRepository>,
    answers: Arc<dyn AnswersRepository>,
    notifications: Arc<dyn NotificationsRepository>,
    clock: Arc<dyn Clock>,
}

impl OnQuestionBestAnswerChosen {
    #[must_use]
    pub fn new(
        questions: Arc<dyn QuestionsRepository>,
        answers: Arc<dyn AnswersRepository>,
        notifications: Arc<dyn NotificationsRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            questions,
            answers,
            notifications,
            clock,
        }
    }
}

#[async_trait]
impl EventHandler for OnQuestionBestAnswerChosen {
    fn name(&self) -> &str {
        "notification.on_question_best_answer_chosen"
    }

    async fn handle(&self, event: &EventRecord) -> Result<(), DomainError> {
        let payload: QuestionBestAnswerChosen = event.decode()?;
        let Some(answer) = self.answers.find_by_id(payload.best_answer_id).await? else {
            debug!(answer_id = %payload.best_answer_id, "chosen answer is gone, skipping");
            return Ok(());
        };
        let Some(question) = self.questions.find_by_id(payload.question_id).await? else {
            debug!(question_id = %payload.question_id, "question is gone, skipping");
            return Ok(());
        };

        let command = SendNotification {
            recipient_id: answer.author_id(),
            title: BEST_ANSWER_TITLE.to_owned(),
            content: format!(
                "The answer you sent on \"{}\" was chosen by the author.",
                shorten(question.title(), 20)
            ),
        };
        send(command, &*self.clock, &*self.notifications).await
    }
}

/// Subscribes the notification handlers to forum events. Calling it again on
/// the same dispatcher adds nothing.
pub fn register_subscribers(
    dispatcher: &EventDispatcher,
    questions: &Arc<dyn QuestionsRepository>,
    answers: &Arc<dyn AnswersRepository>,
    notifications: &Arc<dyn NotificationsRepository>,
    clock: &Arc<dyn Clock>,
) {
    dispatcher.register_once(
        ANSWER_CREATED_EVENT_TYPE,
        Arc::new(OnAnswerCreated::new(
            Arc::clone(questions),
            Arc::clone(notifications),
            Arc::clone(clock),
        )),
    );
    dispatcher.register_once(
        QUESTION_BEST_ANSWER_CHOSEN_EVENT_TYPE,
        Arc::new(OnQuestionBestAnswerChosen::new(
            Arc::clone(questions),
            Arc::clone(answers),
            Arc::clone(notifications),
            Arc::clone(clock),
        )),
    );
}
