//! REST API module for HTTP endpoints
//!
//! - `POST /webhook` - Capture a webhook
//! - `GET /api/webhooks` - List captured webhooks, newest first
//! - `GET /api/webhooks/:id` - Get one captured webhook
//! - `GET /api/stats` - Store counters
//! - `GET /health` - Liveness

pub mod health;
pub mod stats;
pub mod webhooks;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::event_store::EventStoreError;
use crate::types::EventId;

/// Common pagination parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    /// Maximum number of items to return (default: 100, max: 1000)
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Number of items to skip
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    100
}

impl PaginationParams {
    /// Normalize limit to max 1000
    pub fn normalized_limit(&self) -> usize {
        self.limit.min(1000)
    }
}

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Newest resident event, for change detection by polling clients
    pub latest_id: Option<EventId>,
    /// Total count (for paginated responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, latest_id: Option<EventId>) -> Self {
        Self {
            data,
            latest_id,
            total: None,
        }
    }

    pub fn with_total(data: T, latest_id: Option<EventId>, total: usize) -> Self {
        Self {
            data,
            latest_id,
            total: Some(total),
        }
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: message.into(),
            code: "NOT_FOUND".to_string(),
        }
    }
}

impl From<EventStoreError> for ApiError {
    fn from(err: EventStoreError) -> Self {
        match err {
            EventStoreError::NotFound(id) => ApiError::not_found(format!("Webhook {} not found", id)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
