//! Event types for captured webhooks
//!
//! An `Event` is the immutable record of one received webhook. The store is the
//! only place that turns a `NewEvent` into an `Event`, because it owns id and
//! timestamp assignment.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::{BodyKind, HeaderList, ParsedBody};

/// Identifier assigned by the event store, strictly increasing from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl EventId {
    /// Raw numeric value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(EventId)
    }
}

/// A normalized webhook that has not been stored yet
///
/// Produced by the ingestion normalizer. Carries everything except the id and
/// `received_at`, which only the store may assign.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub client_ip: String,
    pub method: String,
    pub path: String,
    pub query_string: String,
    pub user_agent: Option<String>,
    pub headers: HeaderList,
    pub content_type: String,
    pub raw_body: Option<Bytes>,
    pub parsed_body: ParsedBody,
    pub body_size: usize,
}

impl NewEvent {
    /// Stamp the candidate with its identity. Only called by the event store.
    pub(crate) fn into_event(self, id: EventId, received_at: DateTime<Utc>) -> Event {
        Event {
            id,
            received_at,
            client_ip: self.client_ip,
            method: self.method,
            path: self.path,
            query_string: self.query_string,
            user_agent: self.user_agent,
            headers: self.headers,
            content_type: self.content_type,
            raw_body: self.raw_body,
            parsed_body: self.parsed_body,
            body_size: self.body_size,
        }
    }
}

/// One received webhook, immutable once stored
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: EventId,
    pub received_at: DateTime<Utc>,
    pub client_ip: String,
    pub method: String,
    pub path: String,
    pub query_string: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub headers: HeaderList,
    pub content_type: String,
    /// Raw payload; `None` when only metadata was retained (multipart bodies)
    #[serde(serialize_with = "serialize_raw_body")]
    pub raw_body: Option<Bytes>,
    pub parsed_body: ParsedBody,
    pub body_size: usize,
}

impl Event {
    /// Raw body as text, if it was retained and is valid UTF-8
    pub fn raw_text(&self) -> Option<&str> {
        self.raw_body
            .as_deref()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Build the list projection of this event
    pub fn summary(&self) -> EventSummary {
        EventSummary {
            id: self.id,
            received_at: self.received_at,
            method: self.method.clone(),
            path: self.path.clone(),
            client_ip: self.client_ip.clone(),
            content_type: self.content_type.clone(),
            body_size: self.body_size,
            body_kind: self.parsed_body.kind(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Raw bodies go over the wire as text when decodable, `null` otherwise
fn serialize_raw_body<S: Serializer>(body: &Option<Bytes>, serializer: S) -> Result<S::Ok, S::Error> {
    match body.as_deref().map(std::str::from_utf8) {
        Some(Ok(text)) => serializer.serialize_some(text),
        _ => serializer.serialize_none(),
    }
}

/// Compact view of an event used by list endpoints and the live feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventSummary {
    pub id: EventId,
    pub received_at: DateTime<Utc>,
    pub method: String,
    pub path: String,
    pub client_ip: String,
    pub content_type: String,
    pub body_size: usize,
    pub body_kind: BodyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(raw: &'static [u8]) -> Event {
        NewEvent {
            client_ip: "127.0.0.1".to_string(),
            method: "POST".to_string(),
            path: "/webhook".to_string(),
            query_string: String::new(),
            user_agent: Some("curl/8.0".to_string()),
            headers: HeaderList::default(),
            content_type: String::new(),
            raw_body: Some(Bytes::from_static(raw)),
            parsed_body: ParsedBody::Text(String::from_utf8_lossy(raw).into_owned()),
            body_size: raw.len(),
        }
        .into_event(EventId(7), Utc::now())
    }

    #[test]
    fn test_event_id_parse_and_display() {
        let id: EventId = " 42 ".parse().unwrap();
        assert_eq!(id, EventId(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<EventId>().is_err());
    }

    #[test]
    fn test_raw_body_serializes_as_text() {
        let event = sample(b"hello");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["raw_body"], "hello");
        assert_eq!(json["user_agent"], "curl/8.0");
    }

    #[test]
    fn test_binary_raw_body_serializes_as_null() {
        let event = sample(&[0xff, 0xfe, 0x00]);
        assert!(event.raw_text().is_none());
        let json = serde_json::to_value(&event).unwrap();
        assert!(json["raw_body"].is_null());
    }

    #[test]
    fn test_summary_copies_metadata() {
        let event = sample(b"hi");
        let summary = event.summary();
        assert_eq!(summary.id, event.id);
        assert_eq!(summary.body_size, 2);
        assert_eq!(summary.body_kind, BodyKind::Text);
    }
}
