//! Webhook Echo
//!
//! Captures arbitrary HTTP webhooks, keeps the most recent N in memory and
//! serves them back through a JSON API and a small browser UI.
//!
//! # Features
//!
//! - **Bounded store**: fixed-capacity FIFO ring buffer with O(1) lookup by id
//! - **Thread-Safe**: one mutex guards the buffer and its index together
//! - **Any payload**: JSON, form, multipart, text and binary bodies, never rejected
//! - **Live feed**: Server-Sent Events for every captured webhook
//!
//! # Modules
//!
//! - `types`: Core data structures (Event, ParsedBody, HeaderList)
//! - `event_store`: Bounded event store
//! - `ingest`: Request normalization (client IP, body parsing)
//! - `api`: Axum router, REST endpoints, SSE feed and UI
//! - `config`: CLI and environment configuration
//! - `utils`: Formatting helpers
//!
//! Captured headers are stored and displayed verbatim. Anything secret a sender
//! puts in a header is visible to whoever can reach the API.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use webhook_echo::{create_router, AppState, EventStore};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let store = Arc::new(EventStore::new(1000));
//!     let app = create_router(Arc::new(AppState::new(store)));
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod event_store;
pub mod ingest;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use api::{create_router, AppState};
pub use config::{Config, ConfigError};
pub use event_store::{EventPage, EventStore, EventStoreError, EventStoreResult, StoreStats};
pub use ingest::{normalize, IngestSettings, RawRequest};
pub use types::{
    BodyKind, Event, EventId, EventSummary, FormFields, HeaderList, MultipartPart, NewEvent,
    ParsedBody,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
