//! Favicon endpoint

use axum::{http::header, response::IntoResponse};

const FAVICON_SVG: &str = concat!(
    r#"<?xml version="1.0" encoding="utf-8"?>"#,
    r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64">"#,
    r##"<rect width="64" height="64" fill="#0d6efd"/>"##,
    r##"<text x="50%" y="50%" font-size="36" text-anchor="middle" fill="#ffffff" dy=".35em">E</text>"##,
    "</svg>",
);

/// GET /favicon.ico - Inline SVG so browsers stop logging 404s
pub async fn favicon() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        FAVICON_SVG,
    )
}
