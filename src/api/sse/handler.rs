//! Live feed handler

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
};
use tokio::sync::broadcast;
use tracing::debug;

use super::FeedEvent;
use crate::api::state::AppState;

fn to_sse(message: &FeedEvent) -> Event {
    Event::default()
        .event(message.name())
        .data(serde_json::to_string(message).unwrap_or_default())
}

/// GET /api/webhooks/stream - SSE stream of newly captured webhooks
pub async fn stream_webhooks(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    // Subscribe before reading latest_id so nothing slips between the two
    let mut event_rx = state.subscribe();
    let mut shutdown = state.shutdown_signal();
    let welcome = FeedEvent::Welcome {
        latest_id: state.store.latest_id(),
        capacity: state.store.capacity(),
    };

    let stream = async_stream::stream! {
        yield Ok::<_, Infallible>(to_sse(&welcome));

        loop {
            if *shutdown.borrow() {
                break;
            }
            let received = tokio::select! {
                received = event_rx.recv() => received,
                _ = shutdown.changed() => break,
            };
            match received {
                Ok(summary) => {
                    yield Ok(to_sse(&FeedEvent::Webhook { summary }));
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    debug!(missed = n, "live feed subscriber lagged");
                    yield Ok(to_sse(&FeedEvent::Error {
                        code: "lagged".to_string(),
                        message: format!("Missed {} webhooks, reload the list", n),
                    }));
                }
                Err(broadcast::error::RecvError::Closed) => {
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default().interval(Duration::from_secs(30)))
}
