//! Event Store Module
//!
//! Bounded, thread-safe storage for received webhooks:
//! - `EventStore`: fixed-capacity FIFO ring buffer with O(1) lookup by id
//! - `StoreStats`: point-in-time counters
//!
//! # Architecture
//!
//! ```text
//! Write Path:
//! ┌──────────┐    ┌────────────┐    ┌──────────────────────────────┐
//! │ webhook  │───►│ normalize  │───►│ lock: assign id, evict front │
//! │ request  │    │ (no lock)  │    │ if full, push back + index   │
//! └──────────┘    └────────────┘    └──────────────────────────────┘
//!
//! Read Path:
//! ┌──────────────┐    ┌──────────────────────────┐
//! │ API / UI     │───►│ lock: copy Arc handles   │───► serialize unlocked
//! └──────────────┘    └──────────────────────────┘
//! ```

mod stats;
mod store;

pub use stats::StoreStats;
pub use store::{EventPage, EventStore, EventStoreError, EventStoreResult, DEFAULT_CAPACITY};
