//! multipart/form-data parsing
//!
//! Parts are reduced to metadata. Text is kept only for small, textual,
//! non-file parts so uploads do not pin large buffers in the store.

use std::convert::Infallible;

use bytes::Bytes;
use futures::stream;

use super::body::is_textual;
use crate::types::MultipartPart;

/// Split a buffered multipart body into parts
///
/// Fails on a missing boundary or a malformed stream; the caller degrades to a
/// coarser representation.
pub(crate) async fn parse_multipart(
    content_type: &str,
    body: Bytes,
    max_text_part_bytes: usize,
) -> Result<Vec<MultipartPart>, multer::Error> {
    let boundary = multer::parse_boundary(content_type)?;
    let chunks = stream::iter([Ok::<Bytes, Infallible>(body)]);
    let mut multipart = multer::Multipart::new(chunks, boundary);

    let mut parts = Vec::new();
    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        let filename = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(|mime| mime.to_string());

        let keep_text = filename.is_none() && content_type.as_deref().map_or(true, is_textual);
        let mut buffer = keep_text.then(Vec::new);
        let mut size = 0usize;

        while let Some(chunk) = field.chunk().await? {
            size += chunk.len();
            let overflow = buffer
                .as_ref()
                .map_or(false, |buf| buf.len() + chunk.len() > max_text_part_bytes);
            if overflow {
                buffer = None;
            } else if let Some(buf) = buffer.as_mut() {
                buf.extend_from_slice(&chunk);
            }
        }

        parts.push(MultipartPart {
            name,
            filename,
            content_type,
            size,
            text: buffer.and_then(|buf| String::from_utf8(buf).ok()),
        });
    }

    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT_TYPE: &str = "multipart/form-data; boundary=X-BOUNDARY";

    fn body(parts: &[&str]) -> Bytes {
        let mut out = String::new();
        for part in parts {
            out.push_str("--X-BOUNDARY\r\n");
            out.push_str(part);
            out.push_str("\r\n");
        }
        out.push_str("--X-BOUNDARY--\r\n");
        Bytes::from(out)
    }

    #[tokio::test]
    async fn test_text_and_file_parts() {
        let body = body(&[
            "Content-Disposition: form-data; name=\"event\"\r\n\r\nrun.completed",
            "Content-Disposition: form-data; name=\"log\"; filename=\"run.log\"\r\nContent-Type: application/octet-stream\r\n\r\n0123456789",
        ]);

        let parts = parse_multipart(CONTENT_TYPE, body, 1024).await.unwrap();
        assert_eq!(parts.len(), 2);

        assert_eq!(parts[0].name.as_deref(), Some("event"));
        assert_eq!(parts[0].text.as_deref(), Some("run.completed"));
        assert_eq!(parts[0].size, 13);

        assert_eq!(parts[1].filename.as_deref(), Some("run.log"));
        assert_eq!(parts[1].content_type.as_deref(), Some("application/octet-stream"));
        assert_eq!(parts[1].size, 10);
        assert!(parts[1].text.is_none());
    }

    #[tokio::test]
    async fn test_oversized_text_part_keeps_metadata_only() {
        let long = "a".repeat(100);
        let part = format!("Content-Disposition: form-data; name=\"big\"\r\n\r\n{}", long);
        let parts = parse_multipart(CONTENT_TYPE, body(&[&part]), 10).await.unwrap();

        assert_eq!(parts[0].size, 100);
        assert!(parts[0].text.is_none());
    }

    #[tokio::test]
    async fn test_missing_boundary_is_an_error() {
        let result = parse_multipart("multipart/form-data", Bytes::from_static(b"junk"), 10).await;
        assert!(result.is_err());
    }
}
