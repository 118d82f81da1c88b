//! Domain model for the Notification context.

pub mod aggregates;
pub mod commands;
