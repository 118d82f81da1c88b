//! In-memory implementation of the Notification repository port.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use quorum_core::error::DomainError;
use quorum_core::pagination::PaginationParams;
use uuid::Uuid;

use crate::application::repositories::NotificationsRepository;
use crate::domain::aggregates::Notification;

/// In-memory `NotificationsRepository`, kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryNotificationsRepository {
    notifications: Mutex<Vec<Notification>>,
}

impl InMemoryNotificationsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored notification.
    #[must_use]
    pub fn items(&self) -> Vec<Notification> {
        self.store().clone()
    }

    fn store(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl NotificationsRepository for InMemoryNotificationsRepository {
    async fn find_by_id(
        &self,
        notification_id: Uuid,
    ) -> Result<Option<Notification>, DomainError> {
        Ok(self
            .store()
            .iter()
            .find(|notification| notification.id == notification_id)
            .cloned())
    }

    async fn find_many_by_recipient_id(
        &self,
        recipient_id: Uuid,
        params: PaginationParams,
    ) -> Result<Vec<Notification>, DomainError> {
        let mut matching: Vec<Notification> = self
            .store()
            .iter()
            .filter(|notification| notification.recipient_id == recipient_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(params.slice(&matching).to_vec())
    }

    async fn create(&self, notification: &Notification) -> Result<(), DomainError> {
        self.store().push(notification.clone());
        Ok(())
    }

    async fn save(&self, notification: &Notification) -> Result<(), DomainError> {
        let mut store = self.store();
        let Some(stored) = store.iter_mut().find(|stored| stored.id == notification.id) else {
            return Err(DomainError::Infrastructure(format!(
                "notification {} is not stored",
                notification.id
            )));
        };
        *stored = notification.clone();
        Ok(())
    }
}
