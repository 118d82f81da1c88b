//! Application layer for the Notification context.

pub mod command_handlers;
pub mod query_handlers;
pub mod repositories;
pub mod subscribers;
