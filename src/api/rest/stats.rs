//! Store statistics endpoint

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use crate::api::state::AppState;

/// GET /api/stats - Capacity, fill level and eviction counters
pub async fn get_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.stats())
}
