//! Utility functions and helpers
//!
//! Time formatting for the browsing UI.

pub mod time;

pub use time::{format_age, format_timestamp, now_utc};
