//! Quorum: Notification bounded context.
//!
//! Notifications addressed to students, plus the subscribers that turn
//! forum events into notifications.

pub mod application;
pub mod domain;
pub mod infrastructure;
