//! Browser UI for captured webhooks
//!
//! Server-rendered HTML; no scripts beyond what the browser needs to follow
//! links. Every captured value is escaped before it reaches a page.
//!
//! ## Endpoints
//! - `GET /` - Paginated list
//! - `GET /webhooks/:id` - Detail page
//! - `GET /favicon.ico` - Inline SVG icon

pub mod favicon;
pub mod pages;

/// Escape text for use inside HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const SIZE_UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

/// Byte count as shown in tables: `512 B`, `2.0 KiB`, `5.0 MiB`
pub(crate) fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < SIZE_UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, SIZE_UNITS[unit])
}

/// Wrap page content in the shared layout
pub(crate) fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="icon" href="/favicon.ico" type="image/svg+xml">
<style>
body {{ font-family: system-ui, sans-serif; margin: 2rem; color: #212529; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ text-align: left; padding: .35rem .6rem; border-bottom: 1px solid #dee2e6; vertical-align: top; }}
pre {{ background: #f8f9fa; padding: 1rem; overflow-x: auto; }}
.muted {{ color: #6c757d; }}
nav a {{ margin-right: 1rem; }}
</style>
</head>
<body>
<h1><a href="/">Webhook Echo</a></h1>
{content}
</body>
</html>"#,
        title = escape_html(title),
        content = content,
    )
}
