//! Webhook capture and query endpoints

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, Path, Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;

use super::{ApiError, ApiResponse, PaginationParams};
use crate::api::state::AppState;
use crate::ingest::{normalize, RawRequest};
use crate::types::{EventId, EventSummary};

/// Acknowledgement returned to the webhook sender
#[derive(Debug, Serialize)]
pub struct ReceiveResponse {
    pub status: &'static str,
    pub id: EventId,
}

/// POST /webhook - Capture any payload
///
/// Always answers 200 once the body has been read; payloads that do not parse
/// are stored in a coarser form.
pub async fn receive_webhook(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let peer_addr = connect_info.map(|ConnectInfo(addr)| addr);
    let raw = RawRequest::from_http(&method, &uri, &headers, peer_addr, body);

    let new_event = normalize(raw, &state.ingest).await;
    let event = state.store.append(new_event);
    state.publish(event.summary());

    info!(
        id = %event.id,
        client_ip = %event.client_ip,
        path = %event.path,
        body_kind = %event.parsed_body.kind(),
        body_size = event.body_size,
        "received webhook"
    );

    (
        StatusCode::OK,
        Json(ReceiveResponse {
            status: "received",
            id: event.id,
        }),
    )
}

/// GET /api/webhooks - List captured webhooks, newest first
pub async fn list_webhooks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> impl IntoResponse {
    let page = state.store.page(params.offset, params.normalized_limit());
    let summaries: Vec<EventSummary> = page.events.iter().map(|e| e.summary()).collect();

    Json(ApiResponse::with_total(summaries, page.latest_id, page.total))
}

/// GET /api/webhooks/:id - Get one captured webhook
///
/// Evicted and never-seen ids both answer 404, as do ids that are not numbers.
pub async fn get_webhook(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: EventId = id
        .parse()
        .map_err(|_| ApiError::not_found(format!("Webhook '{}' not found", id)))?;
    let event = state.store.get(id)?;

    Ok(Json(ApiResponse::new(event, state.store.latest_id())))
}
