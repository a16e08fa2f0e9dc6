//! List and detail pages

use std::fmt::Write as _;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use super::{escape_html, format_size, layout};
use crate::api::state::AppState;
use crate::types::{Event, EventId, ParsedBody};
use crate::utils::{format_age, format_timestamp, now_utc};

const MAX_PER_PAGE: usize = 200;

/// Query parameters for the list page
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn default_page() -> usize {
    1
}

fn default_per_page() -> usize {
    25
}

impl PageParams {
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    pub fn per_page(&self) -> usize {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }

    pub fn offset(&self) -> usize {
        (self.page() - 1).saturating_mul(self.per_page())
    }
}

/// GET / - Recent webhooks, newest first
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Html<String> {
    let page_no = params.page();
    let per_page = params.per_page();
    let page = state.store.page(params.offset(), per_page);
    let now = now_utc();

    let stats = state.store.stats();
    let eviction_note = if stats.is_full() {
        ", oldest is evicted next"
    } else {
        ""
    };

    let mut content = String::new();
    let _ = write!(
        content,
        r#"<p class="muted">{} of {} webhooks retained ({:.0}% full{}). POST anything to <code>/webhook</code>.</p>"#,
        stats.count,
        stats.capacity,
        stats.utilization(),
        eviction_note
    );

    if page.events.is_empty() {
        content.push_str("<p>No webhooks on this page.</p>");
    } else {
        content.push_str(
            "<table><thead><tr><th>#</th><th>Received</th><th>Method</th><th>Path</th>\
             <th>Client</th><th>Content-Type</th><th>Size</th><th>Body</th></tr></thead><tbody>",
        );
        for event in &page.events {
            let _ = write!(
                content,
                r#"<tr><td><a href="/webhooks/{id}">{id}</a></td><td title="{at}">{age}</td><td>{method}</td><td>{path}</td><td>{ip}</td><td>{ct}</td><td>{size}</td><td>{kind}</td></tr>"#,
                id = event.id,
                at = format_timestamp(&event.received_at),
                age = format_age(&event.received_at, &now),
                method = escape_html(&event.method),
                path = escape_html(&event.path),
                ip = escape_html(&event.client_ip),
                ct = escape_html(&event.content_type),
                size = format_size(event.body_size as u64),
                kind = event.parsed_body.kind(),
            );
        }
        content.push_str("</tbody></table>");
    }

    content.push_str("<nav>");
    if page_no > 1 {
        let _ = write!(
            content,
            r#"<a href="/?page={}&amp;per_page={}">&larr; Newer</a>"#,
            page_no - 1,
            per_page
        );
    }
    if params.offset() + page.events.len() < page.total {
        let _ = write!(
            content,
            r#"<a href="/?page={}&amp;per_page={}">Older &rarr;</a>"#,
            page_no + 1,
            per_page
        );
    }
    content.push_str("</nav>");

    Html(layout("Webhook Echo", &content))
}

/// GET /webhooks/:id - Full detail of one webhook
pub async fn detail(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let found = id.parse::<EventId>().ok().and_then(|id| state.store.get(id).ok());

    match found {
        Some(event) => Html(render_detail(&event)).into_response(),
        None => {
            let content = format!(
                "<p>Webhook <code>{}</code> not found. It may have been evicted.</p>",
                escape_html(&id)
            );
            (StatusCode::NOT_FOUND, Html(layout("Webhook not found", &content))).into_response()
        }
    }
}

fn render_detail(event: &Event) -> String {
    let mut content = String::new();
    let _ = write!(content, "<h2>Webhook {}</h2><table>", event.id);

    let query = if event.query_string.is_empty() {
        String::new()
    } else {
        format!("?{}", event.query_string)
    };
    let rows = [
        ("Received", format_timestamp(&event.received_at)),
        ("Method", event.method.clone()),
        ("Path", format!("{}{}", event.path, query)),
        ("Client IP", event.client_ip.clone()),
        ("User-Agent", event.user_agent.clone().unwrap_or_default()),
        ("Content-Type", event.content_type.clone()),
        ("Size", format_size(event.body_size as u64)),
        ("Body", event.parsed_body.kind().to_string()),
    ];
    for (label, value) in rows {
        let _ = write!(content, "<tr><th>{}</th><td>{}</td></tr>", label, escape_html(&value));
    }
    content.push_str("</table>");

    content.push_str("<h3>Headers</h3><table>");
    for header in event.headers.iter() {
        let _ = write!(
            content,
            "<tr><th>{}</th><td>{}</td></tr>",
            escape_html(&header.name),
            escape_html(&header.value)
        );
    }
    content.push_str("</table>");

    content.push_str("<h3>Body</h3>");
    content.push_str(&render_body(&event.parsed_body));

    layout(&format!("Webhook {}", event.id), &content)
}

/// Human-friendly rendering of each body variant
fn render_body(body: &ParsedBody) -> String {
    match body {
        ParsedBody::Json(value) => {
            let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            format!("<pre>{}</pre>", escape_html(&pretty))
        }
        ParsedBody::Form(fields) => {
            let mut out = String::from("<table>");
            for field in fields.iter() {
                for value in &field.values {
                    let _ = write!(
                        out,
                        "<tr><th>{}</th><td>{}</td></tr>",
                        escape_html(&field.name),
                        escape_html(value)
                    );
                }
            }
            out.push_str("</table>");
            out
        }
        ParsedBody::Multipart(parts) => {
            let mut out = String::from(
                "<table><thead><tr><th>Name</th><th>Filename</th><th>Content-Type</th>\
                 <th>Size</th><th>Content</th></tr></thead><tbody>",
            );
            for part in parts {
                let text = match &part.text {
                    Some(text) => format!("<pre>{}</pre>", escape_html(text)),
                    None => r#"<span class="muted">not retained</span>"#.to_string(),
                };
                let _ = write!(
                    out,
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape_html(part.name.as_deref().unwrap_or("")),
                    escape_html(part.filename.as_deref().unwrap_or("")),
                    escape_html(part.content_type.as_deref().unwrap_or("")),
                    format_size(part.size as u64),
                    text
                );
            }
            out.push_str("</tbody></table>");
            out
        }
        ParsedBody::Text(text) if text.is_empty() => r#"<p class="muted">Empty body</p>"#.to_string(),
        ParsedBody::Text(text) => format!("<pre>{}</pre>", escape_html(text)),
        ParsedBody::Binary { size } => format!(
            r#"<p class="muted">Binary payload, {} (not displayed)</p>"#,
            format_size(*size as u64)
        ),
    }
}
