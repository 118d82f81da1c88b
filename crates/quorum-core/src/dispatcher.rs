//! In-process domain event dispatcher.
//!
//! Subscribers register against an event tag at startup. Persistence adapters
//! hand an aggregate's pending events over with [`EventDispatcher::mark_pending`]
//! once the aggregate is stored, then call [`EventDispatcher::dispatch`] with
//! its id. Dispatch is strictly local to this process; nothing is written to
//! durable storage, so events still queued when the process exits are lost.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use async_trait::async_trait;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::aggregate::AggregateRoot;
use crate::error::DomainError;
use crate::event::EventRecord;

/// A subscriber reacting to dispatched events.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Stable name, used for logging and by [`EventDispatcher::register_once`].
    fn name(&self) -> &str;

    /// Reacts to one event.
    ///
    /// # Errors
    ///
    /// Any error aborts the surrounding dispatch call and leaves the event
    /// queued.
    async fn handle(&self, event: &EventRecord) -> Result<(), DomainError>;
}

type HandlerList = Vec<Arc<dyn EventHandler>>;

/// Queued events per aggregate, plus the ids a `dispatch` call is currently
/// draining. Both live under one lock so that claiming an id and finding its
/// queue empty are atomic.
#[derive(Default)]
struct PendingSet {
    queues: HashMap<Uuid, VecDeque<EventRecord>>,
    in_flight: HashSet<Uuid>,
}

/// Exclusive right to drain one aggregate's queue. Dropping a held claim
/// (error, panic, or a cancelled future) frees the id for the next caller.
struct DispatchClaim<'a> {
    dispatcher: &'a EventDispatcher,
    aggregate_id: Uuid,
    held: bool,
}

impl Drop for DispatchClaim<'_> {
    fn drop(&mut self) {
        if self.held {
            self.dispatcher
                .pending_set()
                .in_flight
                .remove(&self.aggregate_id);
        }
    }
}

/// Registry of subscribers plus the set of aggregates awaiting dispatch.
///
/// Construct one per process and share it behind an `Arc`. Tests build their
/// own so that registrations never leak between cases.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: RwLock<HashMap<String, HandlerList>>,
    pending: Mutex<PendingSet>,
}

impl EventDispatcher {
    /// Creates a dispatcher with no subscribers and nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `handler` to the subscribers of `event_type`.
    ///
    /// Registering the same handler twice makes it run twice per event. Use
    /// [`Self::register_once`] where repeated setup is possible.
    pub fn register(&self, event_type: impl Into<String>, handler: Arc<dyn EventHandler>) {
        let event_type = event_type.into();
        debug!(%event_type, handler = handler.name(), "registering event handler");
        self.handlers_mut().entry(event_type).or_default().push(handler);
    }

    /// Appends `handler` unless a handler with the same name is already
    /// subscribed to `event_type`. Returns whether it was added.
    pub fn register_once(
        &self,
        event_type: impl Into<String>,
        handler: Arc<dyn EventHandler>,
    ) -> bool {
        let event_type = event_type.into();
        let mut handlers = self.handlers_mut();
        let list = handlers.entry(event_type.clone()).or_default();
        if list.iter().any(|existing| existing.name() == handler.name()) {
            warn!(%event_type, handler = handler.name(), "handler already registered, skipping");
            return false;
        }
        debug!(%event_type, handler = handler.name(), "registering event handler");
        list.push(handler);
        true
    }

    /// Number of subscribers for `event_type`.
    #[must_use]
    pub fn handler_count(&self, event_type: &str) -> usize {
        self.handlers().get(event_type).map_or(0, Vec::len)
    }

    /// Moves the aggregate's pending events into the awaiting-dispatch set.
    ///
    /// Events join the back of any queue already held for the same aggregate
    /// id. An aggregate with no pending events is left out of the set.
    pub fn mark_pending<A: AggregateRoot + ?Sized>(&self, aggregate: &mut A) {
        let events = aggregate.take_pending_events();
        if events.is_empty() {
            return;
        }
        let aggregate_id = aggregate.aggregate_id();
        debug!(%aggregate_id, count = events.len(), "aggregate marked for dispatch");
        self.pending_set()
            .queues
            .entry(aggregate_id)
            .or_default()
            .extend(events);
    }

    /// Returns `true` if events are queued for `aggregate_id`.
    #[must_use]
    pub fn is_pending(&self, aggregate_id: Uuid) -> bool {
        self.pending_set().queues.contains_key(&aggregate_id)
    }

    /// Snapshot of the events queued for `aggregate_id`.
    #[must_use]
    pub fn pending_events(&self, aggregate_id: Uuid) -> Vec<EventRecord> {
        self.pending_set()
            .queues
            .get(&aggregate_id)
            .map(|queue| queue.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Delivers every event queued for `aggregate_id`, oldest first, to each
    /// subscriber of its tag in registration order. Returns how many events
    /// were delivered; an id with nothing queued yields `Ok(0)`.
    ///
    /// An event leaves the queue only after all its subscribers succeed.
    ///
    /// One call at a time drains a given aggregate. A call made while another
    /// is draining the same id returns `Ok(0)` at once; the running call
    /// picks up any events marked in the meantime before it releases the id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Dispatch` on the first subscriber failure. The
    /// failing event and the ones after it stay queued, so calling `dispatch`
    /// again resumes from that event.
    pub async fn dispatch(&self, aggregate_id: Uuid) -> Result<usize, DomainError> {
        let Some(mut claim) = self.claim(aggregate_id) else {
            debug!(%aggregate_id, "dispatch already running for aggregate");
            return Ok(0);
        };
        let mut delivered = 0;

        while let Some(event) = self.next_event(&mut claim) {
            let handlers = self
                .handlers()
                .get(event.event_type())
                .cloned()
                .unwrap_or_default();

            for handler in &handlers {
                if let Err(err) = handler.handle(&event).await {
                    error!(
                        %aggregate_id,
                        event_type = event.event_type(),
                        handler = handler.name(),
                        error = %err,
                        "event handler failed"
                    );
                    return Err(DomainError::Dispatch {
                        event_type: event.event_type().to_owned(),
                        handler: handler.name().to_owned(),
                        message: err.to_string(),
                    });
                }
            }

            self.complete(aggregate_id, event.metadata.event_id);
            delivered += 1;
        }

        if delivered > 0 {
            debug!(%aggregate_id, delivered, "dispatched aggregate events");
        }
        Ok(delivered)
    }

    /// Drops every registration and every queued event.
    pub fn reset(&self) {
        self.handlers_mut().clear();
        self.pending_set().queues.clear();
    }

    fn claim(&self, aggregate_id: Uuid) -> Option<DispatchClaim<'_>> {
        if !self.pending_set().in_flight.insert(aggregate_id) {
            return None;
        }
        Some(DispatchClaim {
            dispatcher: self,
            aggregate_id,
            held: true,
        })
    }

    /// Front of the claimed queue. When the queue is empty the claim is
    /// released under the same lock, so no marked event is left unclaimed.
    fn next_event(&self, claim: &mut DispatchClaim<'_>) -> Option<EventRecord> {
        let mut pending = self.pending_set();
        let front = pending
            .queues
            .get(&claim.aggregate_id)
            .and_then(|queue| queue.front().cloned());
        if front.is_none() {
            pending.queues.remove(&claim.aggregate_id);
            pending.in_flight.remove(&claim.aggregate_id);
            claim.held = false;
        }
        front
    }

    fn complete(&self, aggregate_id: Uuid, event_id: Uuid) {
        let mut pending = self.pending_set();
        let Some(queue) = pending.queues.get_mut(&aggregate_id) else {
            return;
        };
        if queue.front().is_some_and(|e| e.metadata.event_id == event_id) {
            queue.pop_front();
        }
        if queue.is_empty() {
            pending.queues.remove(&aggregate_id);
        }
    }

    // Locks are never held across an await, so a poisoned lock only means a
    // panic happened mid-update of plain collections; the data is still usable.
    fn handlers(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, HandlerList>> {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn handlers_mut(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, HandlerList>> {
        self.handlers.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn pending_set(&self) -> MutexGuard<'_, PendingSet> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<String> = self.handlers().keys().cloned().collect();
        f.debug_struct("EventDispatcher")
            .field("event_types", &tags)
            .field("pending_aggregates", &self.pending_set().queues.len())
            .finish()
    }
}
