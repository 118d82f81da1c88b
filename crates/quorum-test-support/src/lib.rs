//! Shared test doubles for the Quorum forum backend.

mod clock;
mod handler;

pub use clock::FixedClock;
pub use handler::{FailingHandler, RecordingHandler};
