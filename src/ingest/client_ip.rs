//! Client address resolution
//!
//! `X-Forwarded-For` wins when trusted, so the service reports the real caller
//! behind a reverse proxy. A direct client can forge that header; the value is
//! informational only and nothing in the service relies on it.

use std::net::SocketAddr;

use crate::types::HeaderList;

pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// Reported when neither a forwarded address nor a peer address is available
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Pick the address recorded as `client_ip`
pub fn resolve_client_ip(
    headers: &HeaderList,
    peer_addr: Option<SocketAddr>,
    trust_forwarded_for: bool,
) -> String {
    if trust_forwarded_for {
        if let Some(forwarded) = headers.get(FORWARDED_FOR).and_then(first_forwarded) {
            return forwarded;
        }
    }

    peer_addr
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// First non-empty entry of a comma-separated forwarding chain
fn first_forwarded(value: &str) -> Option<String> {
    let first = value.split(',').next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}
