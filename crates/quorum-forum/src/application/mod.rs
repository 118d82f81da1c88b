//! Application layer for the Forum context.

pub mod command_handlers;
pub mod query_handlers;
pub mod repositories;
