//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::DomainError;

/// Metadata attached to every recorded domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Tag used to route the event to its subscribers.
    pub event_type: String,
    /// Aggregate that recorded this event.
    pub aggregate_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

/// Trait implemented by every event payload type.
///
/// The tag is fixed per payload type so that subscribers can match on it
/// without knowing the concrete Rust type.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + std::fmt::Debug {
    /// Routing tag for this event kind.
    const EVENT_TYPE: &'static str;
}

/// A recorded event: metadata plus an immutable JSON snapshot of the payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Serialized event payload.
    pub payload: serde_json::Value,
}

impl EventRecord {
    /// Builds a record for `event`, raised by `aggregate_id` at `occurred_at`.
    ///
    /// # Panics
    ///
    /// Panics if the payload's `Serialize` impl fails, which derived impls
    /// never do.
    #[must_use]
    pub fn new<E: DomainEvent>(aggregate_id: Uuid, event: &E, occurred_at: DateTime<Utc>) -> Self {
        Self {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: E::EVENT_TYPE.to_owned(),
                aggregate_id,
                occurred_at,
            },
            // Serialization of derived Serialize types to Value is infallible.
            payload: serde_json::to_value(event).expect("event payload serialization is infallible"),
        }
    }

    /// Returns the routing tag.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.metadata.event_type
    }

    /// Returns the id of the aggregate that raised this event.
    #[must_use]
    pub fn aggregate_id(&self) -> Uuid {
        self.metadata.aggregate_id
    }

    /// Decodes the payload back into its typed form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EventDecoding` if the record's tag does not match
    /// `E::EVENT_TYPE` or the payload does not deserialize into `E`.
    pub fn decode<E: DomainEvent>(&self) -> Result<E, DomainError> {
        if self.metadata.event_type != E::EVENT_TYPE {
            return Err(DomainError::EventDecoding {
                event_type: self.metadata.event_type.clone(),
                message: format!("expected event type {}", E::EVENT_TYPE),
            });
        }
        serde_json::from_value(self.payload.clone()).map_err(|e| DomainError::EventDecoding {
            event_type: self.metadata.event_type.clone(),
            message: e.to_string(),
        })
    }
}
