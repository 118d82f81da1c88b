//! Quorum: Forum bounded context.
//!
//! Questions, answers, their attachments and comments, and the students who
//! author them. Answers and best-answer choices raise domain events that the
//! notification context subscribes to.

pub mod application;
pub mod domain;
pub mod infrastructure;
