//! SSE (Server-Sent Events) live feed of captured webhooks
//!
//! Lets the browsing UI and `curl -N` watch webhooks arrive without polling.
//!
//! ## Endpoints
//! - `GET /api/webhooks/stream` - `welcome`, then one `webhook` event per capture

pub mod handler;

use serde::Serialize;

use crate::types::{EventId, EventSummary};

/// Messages sent on the live feed
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedEvent {
    /// First message on connect
    Welcome {
        latest_id: Option<EventId>,
        capacity: usize,
    },
    /// A webhook was stored
    Webhook {
        #[serde(flatten)]
        summary: EventSummary,
    },
    /// The subscriber fell behind and missed messages
    Error { code: String, message: String },
}

impl FeedEvent {
    /// SSE `event:` name for this message
    pub fn name(&self) -> &'static str {
        match self {
            FeedEvent::Welcome { .. } => "welcome",
            FeedEvent::Webhook { .. } => "webhook",
            FeedEvent::Error { .. } => "error",
        }
    }
}
