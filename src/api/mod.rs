//! API module for HTTP endpoints
//!
//! This module is the HTTP surface around the event store: webhook capture,
//! the JSON query API, the SSE live feed and the browser UI.

pub mod http;
pub mod rest;
pub mod sse;
pub mod state;
pub mod ui;

pub use http::create_router;
pub use state::AppState;
