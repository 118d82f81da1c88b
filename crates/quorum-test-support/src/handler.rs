//! Test subscribers: `EventHandler` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use quorum_core::dispatcher::EventHandler;
use quorum_core::error::DomainError;
use quorum_core::event::EventRecord;
use uuid::Uuid;

/// A handler that records every event it receives and always succeeds.
#[derive(Debug)]
pub struct RecordingHandler {
    name: String,
    received: Mutex<Vec<EventRecord>>,
}

impl RecordingHandler {
    /// Create a recording handler registered under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all events received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn received(&self) -> Vec<EventRecord> {
        self.received.lock().unwrap().clone()
    }

    /// Returns the ids of the aggregates whose events were received, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn aggregate_ids(&self) -> Vec<Uuid> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .map(EventRecord::aggregate_id)
            .collect()
    }
}

#[async_trait]
impl EventHandler for RecordingHandler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, event: &EventRecord) -> Result<(), DomainError> {
        self.received.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// A handler that always fails with an infrastructure error. Useful for
/// testing dispatch fault propagation.
#[derive(Debug)]
pub struct FailingHandler;

#[async_trait]
impl EventHandler for FailingHandler {
    fn name(&self) -> &str {
        "failing"
    }

    async fn handle(&self, _event: &EventRecord) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
