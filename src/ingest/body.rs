//! Body parsing by content type
//!
//! Nothing here fails: a body that does not match its declared type is kept as
//! text, or as a size when it is not UTF-8.

use bytes::Bytes;
use tracing::debug;

use super::multipart::parse_multipart;
use crate::types::{FormFields, ParsedBody};

/// Lowercased media type without parameters, e.g. `application/json`
pub fn content_type_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn is_json(essence: &str) -> bool {
    essence == "application/json" || essence.ends_with("+json")
}

/// Whether a part or payload with this content type is worth keeping as text
pub(crate) fn is_textual(content_type: &str) -> bool {
    let essence = content_type_essence(content_type);
    essence.starts_with("text/")
        || is_json(&essence)
        || essence.ends_with("+xml")
        || matches!(
            essence.as_str(),
            "application/xml" | "application/x-www-form-urlencoded" | "application/javascript"
        )
}

/// Parse `body` according to `content_type`
pub async fn parse_body(content_type: &str, body: &Bytes, max_text_part_bytes: usize) -> ParsedBody {
    if body.is_empty() {
        return ParsedBody::Text(String::new());
    }

    let essence = content_type_essence(content_type);

    if is_json(&essence) {
        return match serde_json::from_slice(body) {
            Ok(value) => ParsedBody::Json(value),
            Err(e) => {
                debug!(error = %e, "JSON body did not parse, keeping raw text");
                text_or_binary(body)
            }
        };
    }

    if essence == "application/x-www-form-urlencoded" {
        return match std::str::from_utf8(body) {
            Ok(text) => ParsedBody::Form(parse_form(text)),
            Err(_) => {
                debug!("form body is not UTF-8, keeping size only");
                ParsedBody::Binary { size: body.len() }
            }
        };
    }

    if essence == "multipart/form-data" {
        return match parse_multipart(content_type, body.clone(), max_text_part_bytes).await {
            Ok(parts) if !parts.is_empty() => ParsedBody::Multipart(parts),
            Ok(_) => {
                debug!("multipart body had no parts, keeping raw body");
                text_or_binary(body)
            }
            Err(e) => {
                debug!(error = %e, "multipart body did not parse, keeping raw body");
                text_or_binary(body)
            }
        };
    }

    text_or_binary(body)
}

/// Text when the bytes are UTF-8, otherwise only the size
pub fn text_or_binary(body: &[u8]) -> ParsedBody {
    match std::str::from_utf8(body) {
        Ok(text) => ParsedBody::Text(text.to_string()),
        Err(_) => ParsedBody::Binary { size: body.len() },
    }
}

/// Decode `a=1&b=2&a=3` into ordered fields
pub fn parse_form(text: &str) -> FormFields {
    text.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(name), decode_component(value))
        })
        .collect()
}

/// Percent-decode one form component; undecodable input is kept as sent
fn decode_component(component: &str) -> String {
    let spaced = component.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
