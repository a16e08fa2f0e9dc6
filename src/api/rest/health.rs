//! Health endpoint

use axum::{response::IntoResponse, Json};
use serde_json::json;

/// GET /health - Liveness check, independent of the store
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
