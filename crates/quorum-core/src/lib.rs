//! Quorum Core: shared domain abstractions.
//!
//! Change tracking for child collections, domain events and their in-process
//! dispatcher, and the outcome type returned by every use case. This crate
//! contains no infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod outcome;
pub mod pagination;
pub mod watched_list;
