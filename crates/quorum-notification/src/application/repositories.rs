//! Repository ports for the Notification context.

use async_trait::async_trait;
use quorum_core::error::DomainError;
use quorum_core::pagination::PaginationParams;
use uuid::Uuid;

use crate::domain::aggregates::Notification;

/// Storage port for notifications.
#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    async fn find_by_id(&self, notification_id: Uuid)
    -> Result<Option<Notification>, DomainError>;

    /// Notifications for `recipient_id`, most recent first.
    async fn find_many_by_recipient_id(
        &self,
        recipient_id: Uuid,
        params: PaginationParams,
    ) -> Result<Vec<Notification>, DomainError>;

    async fn create(&self, notification: &Notification) -> Result<(), DomainError>;

    async fn save(&self, notification: &Notification) -> Result<(), DomainError>;
}
