//! Shared application state

use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use crate::config::{Config, DEFAULT_MAX_BODY_BYTES};
use crate::event_store::EventStore;
use crate::ingest::IngestSettings;
use crate::types::EventSummary;

/// Live feed buffer; slower subscribers are told they lagged
pub(crate) const FEED_BUFFER: usize = 1024;

/// Shared application state for all request handlers
pub struct AppState {
    /// The event store
    pub store: Arc<EventStore>,

    /// Normalization settings applied to every webhook
    pub ingest: IngestSettings,

    /// Largest accepted request body
    pub max_body_bytes: usize,

    /// Broadcast channel announcing each stored webhook
    pub event_tx: broadcast::Sender<EventSummary>,

    /// Flips to `true` when the server starts shutting down
    shutdown_tx: watch::Sender<bool>,
}

impl AppState {
    /// Create state around an existing store with default ingestion settings
    pub fn new(store: Arc<EventStore>) -> Self {
        Self::with_settings(store, IngestSettings::default(), DEFAULT_MAX_BODY_BYTES)
    }

    pub fn with_settings(store: Arc<EventStore>, ingest: IngestSettings, max_body_bytes: usize) -> Self {
        let (event_tx, _) = broadcast::channel(FEED_BUFFER);
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            store,
            ingest,
            max_body_bytes,
            event_tx,
            shutdown_tx,
        }
    }

    /// Build the store and state described by `config`
    pub fn from_config(config: &Config) -> Self {
        let store = Arc::new(EventStore::new(config.capacity));
        Self::with_settings(store, config.ingest_settings(), config.max_body_bytes)
    }

    /// Announce a stored webhook to live feed subscribers
    pub fn publish(&self, summary: EventSummary) {
        // No subscribers is not an error
        let _ = self.event_tx.send(summary);
    }

    /// Subscribe to the live feed
    pub fn subscribe(&self) -> broadcast::Receiver<EventSummary> {
        self.event_tx.subscribe()
    }

    /// Ask long-lived streams to finish so graceful shutdown can complete
    pub fn begin_shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Watch for `begin_shutdown`
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }
}
