//! Event Store - bounded in-memory ring buffer of received webhooks
//!
//! The EventStore keeps the most recent `capacity` events. The insertion-ordered
//! deque and the id index live in one `StoreInner` behind one mutex, so readers
//! always see both in the same state.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use thiserror::Error;

use super::stats::StoreStats;
use crate::types::{Event, EventId, NewEvent};

/// Default number of events retained
pub const DEFAULT_CAPACITY: usize = 1000;

/// Upper bound on up-front allocation for very large capacities
const MAX_PREALLOCATION: usize = 4096;

/// Result type for EventStore operations
pub type EventStoreResult<T> = Result<T, EventStoreError>;

/// Errors that can occur in EventStore operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventStoreError {
    /// The id was evicted or never existed; callers cannot tell which
    #[error("event {0} not found")]
    NotFound(EventId),
}

/// A newest-first slice of the store taken at a single point in time
#[derive(Debug, Clone)]
pub struct EventPage {
    pub events: Vec<Arc<Event>>,
    /// Number of resident events when the page was taken
    pub total: usize,
    pub latest_id: Option<EventId>,
}

struct StoreInner {
    /// Oldest at the front, newest at the back
    events: VecDeque<Arc<Event>>,
    index: HashMap<EventId, Arc<Event>>,
    next_id: u64,
    total_received: u64,
    total_evicted: u64,
}

/// Bounded FIFO store shared by every request handler
pub struct EventStore {
    capacity: usize,
    inner: Mutex<StoreInner>,
}

impl EventStore {
    /// Create a store holding at most `capacity` events (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let prealloc = capacity.min(MAX_PREALLOCATION);

        Self {
            capacity,
            inner: Mutex::new(StoreInner {
                events: VecDeque::with_capacity(prealloc),
                index: HashMap::with_capacity(prealloc),
                next_id: 1,
                total_received: 0,
                total_evicted: 0,
            }),
        }
    }

    /// Maximum number of events retained
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store a normalized webhook, evicting the oldest event when full
    ///
    /// Assigns the next id and the receive timestamp. Eviction and insertion
    /// happen in the same critical section, so the count never exceeds capacity.
    pub fn append(&self, new_event: NewEvent) -> Arc<Event> {
        let mut inner = self.inner.lock();

        let id = EventId(inner.next_id);
        inner.next_id += 1;
        let event = Arc::new(new_event.into_event(id, Utc::now()));

        if inner.events.len() >= self.capacity {
            if let Some(evicted) = inner.events.pop_front() {
                inner.index.remove(&evicted.id);
                inner.total_evicted += 1;
            }
        }

        inner.events.push_back(Arc::clone(&event));
        inner.index.insert(id, Arc::clone(&event));
        inner.total_received += 1;

        debug_assert!(inner.events.len() <= self.capacity);
        debug_assert_eq!(inner.events.len(), inner.index.len());

        event
    }

    /// Snapshot of resident events, newest first
    pub fn list(&self) -> Vec<Arc<Event>> {
        let inner = self.inner.lock();
        inner.events.iter().rev().cloned().collect()
    }

    /// Snapshot of resident events, oldest first
    pub fn list_chronological(&self) -> Vec<Arc<Event>> {
        let inner = self.inner.lock();
        inner.events.iter().cloned().collect()
    }

    /// Newest-first page plus the resident count from the same snapshot
    pub fn page(&self, offset: usize, limit: usize) -> EventPage {
        let inner = self.inner.lock();
        EventPage {
            events: inner
                .events
                .iter()
                .rev()
                .skip(offset)
                .take(limit)
                .cloned()
                .collect(),
            total: inner.events.len(),
            latest_id: inner.events.back().map(|e| e.id),
        }
    }

    /// Look up a resident event by id
    pub fn get(&self, id: EventId) -> EventStoreResult<Arc<Event>> {
        self.inner
            .lock()
            .index
            .get(&id)
            .cloned()
            .ok_or(EventStoreError::NotFound(id))
    }

    /// Number of resident events
    pub fn count(&self) -> usize {
        self.inner.lock().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Id of the most recently stored event, if any is resident
    pub fn latest_id(&self) -> Option<EventId> {
        self.inner.lock().events.back().map(|e| e.id)
    }

    /// Counters describing the store at this instant
    pub fn stats(&self) -> StoreStats {
        let inner = self.inner.lock();
        StoreStats {
            capacity: self.capacity,
            count: inner.events.len(),
            total_received: inner.total_received,
            total_evicted: inner.total_evicted,
            oldest_id: inner.events.front().map(|e| e.id),
            newest_id: inner.events.back().map(|e| e.id),
        }
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
