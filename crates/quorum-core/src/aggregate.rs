//! Aggregate root abstraction.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::event::{DomainEvent, EventRecord};

/// Trait for mutable aggregate roots that collect domain events.
///
/// Domain methods record events as they run; nothing is published until a
/// persistence adapter has stored the aggregate and handed the events to the
/// [`crate::dispatcher::EventDispatcher`].
pub trait AggregateRoot: Send + Sync {
    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns events recorded since the last hand-off, oldest first.
    fn pending_events(&self) -> &[EventRecord];

    /// Removes and returns all pending events.
    fn take_pending_events(&mut self) -> Vec<EventRecord>;

    /// Discards all pending events.
    fn clear_events(&mut self) {
        self.take_pending_events();
    }
}

/// Ordered queue of events recorded by one aggregate instance.
///
/// Aggregates embed this and forward the [`AggregateRoot`] event methods to
/// it. The queue is never exposed mutably outside the owning aggregate.
#[derive(Debug, Clone, Default)]
pub struct PendingEvents {
    events: Vec<EventRecord>,
}

impl PendingEvents {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `event` as raised by `aggregate_id` at `occurred_at`.
    pub fn record<E: DomainEvent>(
        &mut self,
        aggregate_id: Uuid,
        event: &E,
        occurred_at: DateTime<Utc>,
    ) {
        self.events
            .push(EventRecord::new(aggregate_id, event, occurred_at));
    }

    /// Returns the queued events.
    #[must_use]
    pub fn as_slice(&self) -> &[EventRecord] {
        &self.events
    }

    /// Removes and returns the queued events.
    pub fn take(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Created {
        name: String,
    }

    impl DomainEvent for Created {
        const EVENT_TYPE: &'static str = "Created";
    }

    #[derive(Debug)]
    struct Board {
        id: Uuid,
        events: PendingEvents,
    }

    impl Board {
        fn rename(&mut self, name: &str, now: DateTime<Utc>) {
            self.events.record(
                self.id,
                &Created {
                    name: name.to_owned(),
                },
                now,
            );
        }
    }

    impl AggregateRoot for Board {
        fn aggregate_id(&self) -> Uuid {
            self.id
        }

        fn pending_events(&self) -> &[EventRecord] {
            self.events.as_slice()
        }

        fn take_pending_events(&mut self) -> Vec<EventRecord> {
            self.events.take()
        }
    }

    #[test]
    fn test_recorded_events_keep_order_and_owner() {
        // Arrange
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let mut board = Board {
            id: Uuid::new_v4(),
            events: PendingEvents::new(),
        };

        // Act
        board.rename("first", now);
        board.rename("second", now);

        // Assert
        let events = board.pending_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].payload["name"], "first");
        assert_eq!(events[1].payload["name"], "second");
        assert!(events.iter().all(|e| e.aggregate_id() == board.id));
        assert!(events.iter().all(|e| e.metadata.occurred_at == now));
    }

    #[test]
    fn test_clear_events_empties_queue() {
        // Arrange
        let mut board = Board {
            id: Uuid::new_v4(),
            events: PendingEvents::new(),
        };
        board.rename("first", Utc::now());

        // Act
        board.clear_events();

        // Assert
        assert!(board.pending_events().is_empty());
    }
}
