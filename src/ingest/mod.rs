//! Ingestion Normalizer
//!
//! Turns a raw inbound request into a `NewEvent` ready for the store:
//! - `client_ip`: forwarded-for / peer address policy
//! - `body`: content-type driven parsing with graceful degradation
//! - `multipart`: part metadata extraction
//!
//! Normalization never fails and never touches the store, so all parsing work
//! happens before the store lock is taken.

mod body;
mod client_ip;
mod multipart;

use std::net::SocketAddr;

use axum::http::{HeaderMap, Method, Uri};
use bytes::Bytes;

use crate::types::{HeaderList, NewEvent, ParsedBody};

pub use body::{content_type_essence, parse_body, parse_form, text_or_binary};
pub use client_ip::{resolve_client_ip, FORWARDED_FOR, UNKNOWN_CLIENT};

/// Default cap on retained text per multipart part
pub const DEFAULT_MAX_TEXT_PART_BYTES: usize = 64 * 1024;

/// Knobs that shape normalization
#[derive(Debug, Clone)]
pub struct IngestSettings {
    /// Use the first `X-Forwarded-For` entry as the client address
    pub trust_forwarded_for: bool,
    /// Multipart text parts larger than this keep only their metadata
    pub max_text_part_bytes: usize,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            trust_forwarded_for: true,
            max_text_part_bytes: DEFAULT_MAX_TEXT_PART_BYTES,
        }
    }
}

/// A fully read inbound request, detached from the transport
#[derive(Debug, Clone)]
pub struct RawRequest {
    pub method: String,
    pub path: String,
    pub query_string: String,
    pub headers: HeaderList,
    pub peer_addr: Option<SocketAddr>,
    pub body: Bytes,
}

impl RawRequest {
    /// Capture an HTTP request, keeping every header line in order
    pub fn from_http(
        method: &Method,
        uri: &Uri,
        headers: &HeaderMap,
        peer_addr: Option<SocketAddr>,
        body: Bytes,
    ) -> Self {
        let headers = headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        Self {
            method: method.as_str().to_string(),
            path: uri.path().to_string(),
            query_string: uri.query().unwrap_or_default().to_string(),
            headers,
            peer_addr,
            body,
        }
    }
}

/// Build the candidate event for a request
pub async fn normalize(raw: RawRequest, settings: &IngestSettings) -> NewEvent {
    let client_ip = resolve_client_ip(&raw.headers, raw.peer_addr, settings.trust_forwarded_for);
    let content_type = raw.headers.get("content-type").unwrap_or_default().to_string();
    let user_agent = raw.headers.get("user-agent").map(str::to_owned);
    let body_size = raw.body.len();

    let parsed_body = parse_body(&content_type, &raw.body, settings.max_text_part_bytes).await;
    let raw_body = match parsed_body {
        ParsedBody::Multipart(_) => None,
        _ => Some(raw.body),
    };

    NewEvent {
        client_ip,
        method: raw.method,
        path: raw.path,
        query_string: raw.query_string,
        user_agent,
        headers: raw.headers,
        content_type,
        raw_body,
        parsed_body,
        body_size,
    }
}
