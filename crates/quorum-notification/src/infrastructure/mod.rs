//! Infrastructure adapters for the Notification context.

pub mod in_memory;
