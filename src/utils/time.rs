//! Time formatting helpers

use chrono::{DateTime, Utc};

/// Current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// `2024-05-01 12:30:05 UTC`
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Coarse age such as `42s ago` or `3h ago`
pub fn format_age(at: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let secs = (*now - *at).num_seconds().max(0);

    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86400)
    }
}
