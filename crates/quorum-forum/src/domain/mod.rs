//! Domain model for the Forum context.

pub mod aggregates;
pub mod commands;
pub mod entities;
pub mod events;
pub mod read_models;
pub mod slug;
