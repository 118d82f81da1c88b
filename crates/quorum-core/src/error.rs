//! Domain error types.
//!
//! `DomainError` is reserved for faults that a use case cannot turn into an
//! expected outcome. Rule violations (missing resource, wrong owner, bad
//! input) are reported through [`crate::outcome::Outcome`] instead.

use thiserror::Error;

/// Top-level fault type shared by all bounded contexts.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A subscriber failed while its event was being dispatched.
    ///
    /// The owning aggregate is already persisted when this surfaces; the
    /// failing event and everything after it remain queued for retry.
    #[error("subscriber {handler} failed on {event_type}: {message}")]
    Dispatch {
        /// Tag of the event being dispatched.
        event_type: String,
        /// Name of the subscriber that failed.
        handler: String,
        /// The subscriber's error message.
        message: String,
    },

    /// An event payload could not be decoded into its typed form.
    #[error("could not decode {event_type} event: {message}")]
    EventDecoding {
        /// Tag of the record being decoded.
        event_type: String,
        /// Decoder error message.
        message: String,
    },

    /// A write collided with data stored concurrently, such as a question
    /// slug claimed between the use case's check and the store's insert.
    #[error("conflict: {0}")]
    Conflict(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
