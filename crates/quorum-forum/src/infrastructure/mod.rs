//! Infrastructure adapters for the Forum context.

pub mod in_memory;
