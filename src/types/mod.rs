//! Data types for the webhook echo service
//!
//! This module contains the records the event store holds and the API serves.

mod body;
mod event;
mod headers;

pub use body::{BodyKind, FormField, FormFields, MultipartPart, ParsedBody};
pub use event::{Event, EventId, EventSummary, NewEvent};
pub use headers::{HeaderEntry, HeaderList};
