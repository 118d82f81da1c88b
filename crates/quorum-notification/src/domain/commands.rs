//! Commands for the Notification context.

use uuid::Uuid;

/// Command to notify a student.
#[derive(Debug, Clone)]
pub struct SendNotification {
    pub recipient_id: Uuid,
    pub title: String,
    pub content: String,
}

/// Command to mark a notification as read. `recipient_id` is the acting
/// student.
#[derive(Debug, Clone)]
pub struct ReadNotification {
    pub notification_id: Uuid,
    pub recipient_id: Uuid,
}
