//! Aggregate roots for the Notification context.

use chrono::{DateTime, Utc};
use quorum_core::clock::Clock;
use serde::Serialize;
use uuid::Uuid;

/// A message addressed to one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Aggregate identifier.
    pub id: Uuid,
    pub(crate) recipient_id: Uuid,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) read_at: Option<DateTime<Utc>>,
    pub(crate) created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an unread notification.
    #[must_use]
    pub fn new(
        recipient_id: Uuid,
        title: impl Into<String>,
        content: impl Into<String>,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient_id,
            title: title.into(),
            content: content.into(),
            read_at: None,
            created_at: clock.now(),
        }
    }

    /// The student the notification is addressed to.
    #[must_use]
    pub fn recipient_id(&self) -> Uuid {
        self.recipient_id
    }

    /// Short headline.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Message body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// When the recipient first read it.
    #[must_use]
    pub fn read_at(&self) -> Option<DateTime<Utc>> {
        self.read_at
    }

    /// When it was sent.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the recipient has read it.
    #[must_use]
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    /// Marks the notification as read. The first read time is kept.
    pub fn read(&mut self, clock: &dyn Clock) {
        if self.read_at.is_none() {
            self.read_at = Some(clock.now());
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use quorum_test_support::FixedClock;

    use super::*;

    #[test]
    fn test_new_notification_is_unread() {
        let clock = FixedClock::default_instant();

        let notification = Notification::new(Uuid::new_v4(), "Title", "Content", &clock);

        assert!(!notification.is_read());
        assert_eq!(notification.created_at(), clock.0);
    }

    #[test]
    fn test_read_keeps_first_read_time() {
        // Arrange
        let first = FixedClock::default_instant();
        let later = FixedClock(first.0 + Duration::hours(1));
        let mut notification = Notification::new(Uuid::new_v4(), "Title", "Content", &first);

        // Act
        notification.read(&first);
        notification.read(&later);

        // Assert
        assert_eq!(notification.read_at(), Some(first.0));
    }
}
