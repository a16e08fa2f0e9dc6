//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::rest::{health, stats, webhooks};
use super::sse::handler::stream_webhooks;
use super::state::AppState;
use super::ui::{favicon, pages};

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // Webhook senders and local tools call from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let receive = post(webhooks::receive_webhook)
        .put(webhooks::receive_webhook)
        .patch(webhooks::receive_webhook);

    Router::new()
        // Capture
        .route("/webhook", receive.clone())
        .route("/webhook/*rest", receive)
        // Health check
        .route("/health", get(health::health_check))
        // REST API endpoints
        .route("/api/webhooks", get(webhooks::list_webhooks))
        .route("/api/webhooks/stream", get(stream_webhooks))
        .route("/api/webhooks/:id", get(webhooks::get_webhook))
        .route("/api/stats", get(stats::get_stats))
        // Browser UI
        .route("/", get(pages::index))
        .route("/webhooks/:id", get(pages::detail))
        .route("/favicon.ico", get(favicon::favicon))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_store::EventStore;
    use crate::types::EventId;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn app_with_capacity(capacity: usize) -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(Arc::new(EventStore::new(capacity))));
        (create_router(state.clone()), state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_webhook(content_type: Option<&str>, body: &'static str) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/webhook");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _) = app_with_capacity(10);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(body_json(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_receive_json_webhook() {
        let (app, state) = app_with_capacity(10);

        let response = app
            .oneshot(post_webhook(
                Some("application/json"),
                r#"{"event":"run.completed","run_id":"abc123"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let ack = body_json(response).await;
        assert_eq!(ack, json!({"status": "received", "id": 1}));

        let event = state.store.get(EventId(1)).unwrap();
        assert_eq!(event.content_type, "application/json");
        assert_eq!(
            event.parsed_body.as_json(),
            Some(&json!({"event": "run.completed", "run_id": "abc123"}))
        );
        // No peer address without a real connection
        assert_eq!(event.client_ip, "unknown");
    }

    #[tokio::test]
    async fn test_malformed_json_still_accepted() {
        let (app, state) = app_with_capacity(10);

        let response = app
            .oneshot(post_webhook(Some("application/json"), "{oops"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let event = state.store.get(EventId(1)).unwrap();
        assert_eq!(event.parsed_body.as_text(), Some("{oops"));
    }

    #[tokio::test]
    async fn test_forwarded_for_is_recorded() {
        let (app, state) = app_with_capacity(10);

        let request = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("X-Forwarded-For", "203.0.113.5, 10.0.0.1")
            .body(Body::from("ping"))
            .unwrap();
        app.oneshot(request).await.unwrap();

        assert_eq!(state.store.get(EventId(1)).unwrap().client_ip, "203.0.113.5");
    }

    #[tokio::test]
    async fn test_subpath_and_query_captured() {
        let (app, state) = app_with_capacity(10);

        let request = Request::builder()
            .method("PUT")
            .uri("/webhook/stripe/events?attempt=2")
            .body(Body::from("x"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let event = state.store.get(EventId(1)).unwrap();
        assert_eq!(event.method, "PUT");
        assert_eq!(event.path, "/webhook/stripe/events");
        assert_eq!(event.query_string, "attempt=2");
    }

    #[tokio::test]
    async fn test_list_is_newest_first_with_eviction() {
        let (app, _) = app_with_capacity(2);

        for body in ["one", "two", "three"] {
            let response = app.clone().oneshot(post_webhook(None, body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/webhooks").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let list = body_json(response).await;

        let ids: Vec<u64> = list["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(list["total"], 2);
        assert_eq!(list["latest_id"], 3);

        let evicted = app
            .oneshot(Request::builder().uri("/api/webhooks/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(evicted.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(evicted).await["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_list_respects_limit_and_offset() {
        let (app, _) = app_with_capacity(10);
        for _ in 0..5 {
            app.clone().oneshot(post_webhook(None, "x")).await.unwrap();
        }

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/webhooks?limit=2&offset=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let list = body_json(response).await;

        let ids: Vec<u64> = list["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![4, 3]);
        assert_eq!(list["total"], 5);
    }

    #[tokio::test]
    async fn test_get_webhook_detail() {
        let (app, _) = app_with_capacity(10);
        app.clone()
            .oneshot(post_webhook(Some("text/plain"), "hello"))
            .await
            .unwrap();

        let response = app
            .oneshot(Request::builder().uri("/api/webhooks/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let detail = body_json(response).await;
        assert_eq!(detail["data"]["id"], 1);
        assert_eq!(detail["data"]["raw_body"], "hello");
        assert_eq!(detail["data"]["body_size"], 5);
        assert_eq!(detail["data"]["parsed_body"], json!({"kind": "text", "value": "hello"}));
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_not_found() {
        let (app, _) = app_with_capacity(10);

        let response = app
            .oneshot(Request::builder().uri("/api/webhooks/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let (app, _) = app_with_capacity(1);
        for _ in 0..3 {
            app.clone().oneshot(post_webhook(None, "x")).await.unwrap();
        }

        let response = app
            .oneshot(Request::builder().uri("/api/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let stats = body_json(response).await;
        assert_eq!(stats["capacity"], 1);
        assert_eq!(stats["count"], 1);
        assert_eq!(stats["total_received"], 3);
        assert_eq!(stats["total_evicted"], 2);
    }

    #[tokio::test]
    async fn test_ui_pages() {
        let (app, _) = app_with_capacity(10);
        app.clone()
            .oneshot(post_webhook(Some("application/json"), r#"{"foo":"bar"}"#))
            .await
            .unwrap();

        let index = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(index.status(), StatusCode::OK);
        let html = body_text(index).await;
        assert!(html.contains(r#"href="/webhooks/1""#));
        assert!(html.contains("1 of 10 webhooks retained (10% full)."));

        let detail = app
            .clone()
            .oneshot(Request::builder().uri("/webhooks/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(detail.status(), StatusCode::OK);
        let html = body_text(detail).await;
        assert!(html.contains("Webhook 1"));
        assert!(html.contains("&quot;foo&quot;: &quot;bar&quot;"));

        let missing = app
            .oneshot(Request::builder().uri("/webhooks/42").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_index_reports_full_store() {
        let (app, _) = app_with_capacity(2);
        for _ in 0..3 {
            app.clone().oneshot(post_webhook(None, "x")).await.unwrap();
        }

        let index = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(index).await;
        assert!(html.contains("2 of 2 webhooks retained (100% full, oldest is evicted next)."));
        assert!(!html.contains(r#"href="/webhooks/1""#));
    }

    #[tokio::test]
    async fn test_favicon() {
        let (app, _) = app_with_capacity(10);

        let response = app
            .oneshot(Request::builder().uri("/favicon.ico").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
    }

    #[tokio::test]
    async fn test_body_limit_rejects_large_payloads() {
        let state = Arc::new(AppState::with_settings(
            Arc::new(EventStore::new(10)),
            Default::default(),
            8,
        ));
        let app = create_router(state.clone());

        let response = app
            .oneshot(post_webhook(None, "this body is far too long"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(state.store.count(), 0);
    }
}
