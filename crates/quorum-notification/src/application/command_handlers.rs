//! Command handlers for the Notification context.

use quorum_core::clock::Clock;
use quorum_core::error::DomainError;
use quorum_core::outcome::{Failure, Outcome};
use tracing::info;

use crate::application::repositories::NotificationsRepository;
use crate::domain::aggregates::Notification;
use crate::domain::commands::{ReadNotification, SendNotification};

/// Handles `SendNotification`.
///
/// # Errors
///
/// Returns `DomainError` if the store fails.
pub async fn handle_send_notification(
    command: &SendNotification,
    clock: &dyn Clock,
    notifications: &dyn NotificationsRepository,
) -> Result<Outcome<Notification>, DomainError> {
    let notification = Notification::new(
        command.recipient_id,
        &command.title,
        &command.content,
        clock,
    );
    notifications.create(&notification).await?;

    info!(
        notification_id = %notification.id,
        recipient_id = %command.recipient_id,
        "notification sent"
    );
    Ok(Outcome::Success(notification))
}

/// Handles `ReadNotification`: only the recipient may read it.
///
/// # Errors
///
/// Returns `DomainError` if the store fails.
pub async fn handle_read_notification(
    command: &ReadNotification,
    clock: &dyn Clock,
    notifications: &dyn NotificationsRepository,
) -> Result<Outcome<Notification>, DomainError> {
    let Some(mut notification) = notifications.find_by_id(command.notification_id).await? else {
        return Ok(Failure::not_found(format!(
            "notification {} not found",
            command.notification_id
        ))
        .into());
    };
    if notification.recipient_id() != command.recipient_id {
        return Ok(Failure::not_allowed("only the recipient can read this notification").into());
    }

    notification.read(clock);
    notifications.save(&notification).await?;

    info!(notification_id = %notification.id, "notification read");
    Ok(Outcome::Success(notification))
}

#[cfg(test)]
mod tests {
    use quorum_core::outcome::FailureKind;
    use quorum_test_support::FixedClock;
    use uuid::Uuid;

    use super::*;
    use crate::infrastructure::in_memory::InMemoryNotificationsRepository;

    async fn send(repo: &InMemoryNotificationsRepository, recipient_id: Uuid) -> Notification {
        let command = SendNotification {
            recipient_id,
            title: "New notification".to_owned(),
            content: "Something happened".to_owned(),
        };
        handle_send_notification(&command, &FixedClock::default_instant(), repo)
            .await
            .unwrap()
            .into_result()
            .unwrap()
    }

    #[tokio::test]
    async fn test_handle_send_notification_stores_unread_notification() {
        // Arrange
        let repo = InMemoryNotificationsRepository::new();
        let recipient_id = Uuid::new_v4();

        // Act
        let notification = send(&repo, recipient_id).await;

        // Assert
        let stored = repo.items();
        assert_eq!(stored, vec![notification]);
        assert_eq!(stored[0].recipient_id(), recipient_id);
        assert!(!stored[0].is_read());
    }

    #[tokio::test]
    async fn test_handle_read_notification_marks_read_for_recipient() {
        // Arrange
        let repo = InMemoryNotificationsRepository::new();
        let recipient_id = Uuid::new_v4();
        let notification = send(&repo, recipient_id).await;
        let clock = FixedClock::default_instant();

        // Act
        let outcome = handle_read_notification(
            &ReadNotification {
                notification_id: notification.id,
                recipient_id,
            },
            &clock,
            &repo,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(outcome.value().unwrap().read_at(), Some(clock.0));
        assert_eq!(repo.items()[0].read_at(), Some(clock.0));
    }

    #[tokio::test]
    async fn test_handle_read_notification_rejects_other_student() {
        // Arrange
        let repo = InMemoryNotificationsRepository::new();
        let notification = send(&repo, Uuid::new_v4()).await;

        // Act
        let outcome = handle_read_notification(
            &ReadNotification {
                notification_id: notification.id,
                recipient_id: Uuid::new_v4(),
            },
            &FixedClock::default_instant(),
            &repo,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(outcome.failure().unwrap().kind, FailureKind::NotAllowed);
        assert!(!repo.items()[0].is_read());
    }

    #[tokio::test]
    async fn test_handle_read_notification_returns_not_found_for_unknown_id() {
        // Arrange
        let repo = InMemoryNotificationsRepository::new();

        // Act
        let outcome = handle_read_notification(
            &ReadNotification {
                notification_id: Uuid::new_v4(),
                recipient_id: Uuid::new_v4(),
            },
            &FixedClock::default_instant(),
            &repo,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(outcome.failure().unwrap().kind, FailureKind::NotFound);
    }
}
