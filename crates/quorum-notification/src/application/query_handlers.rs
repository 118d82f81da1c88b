//! Query handlers for the Notification context.

use quorum_core::error::DomainError;
use quorum_core::outcome::Outcome;
use quorum_core::pagination::PaginationParams;
use uuid::Uuid;

use crate::application::repositories::NotificationsRepository;
use crate::domain::aggregates::Notification;

/// Lists a student's notifications, most recent first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn fetch_recipient_notifications(
    recipient_id: Uuid,
    params: PaginationParams,
    notifications: &dyn NotificationsRepository,
) -> Result<Outcome<Vec<Notification>>, DomainError> {
    let page = notifications
        .find_many_by_recipient_id(recipient_id, params)
        .await?;
    Ok(Outcome::Success(page))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use quorum_test_support::FixedClock;

    use super::*;
    use crate::infrastructure::in_memory::InMemoryNotificationsRepository;

    #[tokio::test]
    async fn test_fetch_recipient_notifications_returns_own_notifications_newest_first() {
        // Arrange
        let repo = InMemoryNotificationsRepository::new();
        let recipient_id = Uuid::new_v4();
        let start = FixedClock::default_instant().0;
        for hour in 0..3 {
            let clock = FixedClock(start + Duration::hours(hour));
            let notification =
                Notification::new(recipient_id, format!("n{hour}"), "content", &clock);
            repo.create(&notification).await.unwrap();
        }
        let other = Notification::new(
            Uuid::new_v4(),
            "other",
            "content",
            &FixedClock::default_instant(),
        );
        repo.create(&other).await.unwrap();

        // Act
        let page = fetch_recipient_notifications(recipient_id, PaginationParams::default(), &repo)
            .await
            .unwrap()
            .into_result()
            .unwrap();

        // Assert
        let titles: Vec<&str> = page.iter().map(Notification::title).collect();
        assert_eq!(titles, vec!["n2", "n1", "n0"]);
    }
}
