//! SSE wire-format encoding.
//!
//! Pure, stateless translation from a [`StreamEvent`] (or a keep-alive
//! comment) to the text/event-stream frame format: optional `event:`, `id:`
//! and `retry:` header lines in that order, one `data:` line per payload
//! line, and exactly one blank-line terminator. Encoding never suspends.

use bytes::Bytes;
use serde_json::Value;

use crate::error::EncodeError;
use crate::event::StreamEvent;

/// Encode an event as one complete SSE frame.
///
/// String payloads are written verbatim; all other JSON values serialize
/// through `serde_json::to_string`. serde_json keeps object keys in a
/// `BTreeMap`, so the canonical form is sorted-key, single-line JSON and
/// the same payload always encodes to the same bytes.
pub fn encode(event: &StreamEvent) -> Result<Bytes, EncodeError> {
    let text = payload_text(&event.payload)?;

    let mut frame = String::with_capacity(text.len() + 64);
    if let Some(kind) = &event.kind {
        frame.push_str("event: ");
        frame.push_str(kind);
        frame.push('\n');
    }
    if let Some(id) = &event.id {
        frame.push_str("id: ");
        frame.push_str(id);
        frame.push('\n');
    }
    if let Some(retry_ms) = event.retry_ms {
        frame.push_str("retry: ");
        frame.push_str(&retry_ms.to_string());
        frame.push('\n');
    }

    // One data: line per payload line, so clients can reconstruct
    // multi-line payloads per the SSE line-continuation rule.
    for line in text.lines() {
        frame.push_str("data: ");
        frame.push_str(line);
        frame.push('\n');
    }

    frame.push('\n');
    Ok(Bytes::from(frame))
}

/// Encode a keep-alive comment frame.
///
/// Comments carry no `event`/`id`/`data` and are ignored by conforming
/// clients; they exist purely to keep the connection from being reaped
/// as idle.
#[must_use]
pub fn comment(text: &str) -> Bytes {
    Bytes::from(format!(": {text}\n\n"))
}

fn payload_text(payload: &Value) -> Result<String, EncodeError> {
    match payload {
        Value::String(text) => Ok(text.clone()),
        other => Ok(serde_json::to_string(other)?),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    /// Parse a frame back into (kind, id, retry, data lines) for round-trip
    /// assertions.
    fn parse_frame(frame: &[u8]) -> (Option<String>, Option<String>, Option<String>, Vec<String>) {
        let text = std::str::from_utf8(frame).unwrap();
        let mut kind = None;
        let mut id = None;
        let mut retry = None;
        let mut data = Vec::new();
        for line in text.lines() {
            if let Some(rest) = line.strip_prefix("event: ") {
                kind = Some(rest.to_string());
            } else if let Some(rest) = line.strip_prefix("id: ") {
                id = Some(rest.to_string());
            } else if let Some(rest) = line.strip_prefix("retry: ") {
                retry = Some(rest.to_string());
            } else if let Some(rest) = line.strip_prefix("data: ") {
                data.push(rest.to_string());
            }
        }
        (kind, id, retry, data)
    }

    #[test]
    fn encodes_all_fields_in_fixed_order() {
        let event = StreamEvent::json(json!({"count": 1}))
            .with_kind("update")
            .with_id("7")
            .with_retry_ms(3000);
        let frame = encode(&event).unwrap();
        assert_eq!(
            &frame[..],
            b"event: update\nid: 7\nretry: 3000\ndata: {\"count\":1}\n\n"
        );
    }

    #[test]
    fn round_trips_fields() {
        let event = StreamEvent::json(json!({"a": 1, "b": [true, null]}))
            .with_kind("metrics")
            .with_id("42");
        let frame = encode(&event).unwrap();
        let (kind, id, retry, data) = parse_frame(&frame);
        assert_eq!(kind.as_deref(), Some("metrics"));
        assert_eq!(id.as_deref(), Some("42"));
        assert_eq!(retry, None);
        assert_eq!(data, vec![r#"{"a":1,"b":[true,null]}"#]);
    }

    #[test]
    fn multiline_text_becomes_one_data_line_per_line() {
        let frame = encode(&StreamEvent::text("a\nb")).unwrap();
        assert_eq!(&frame[..], b"data: a\ndata: b\n\n");
    }

    #[test]
    fn text_payload_is_not_json_quoted() {
        let frame = encode(&StreamEvent::text("plain text")).unwrap();
        assert_eq!(&frame[..], b"data: plain text\n\n");
    }

    #[test]
    fn scalar_payloads_serialize_canonically() {
        let frame = encode(&StreamEvent::json(json!(true))).unwrap();
        assert_eq!(&frame[..], b"data: true\n\n");
        let frame = encode(&StreamEvent::json(json!(12.5))).unwrap();
        assert_eq!(&frame[..], b"data: 12.5\n\n");
    }

    #[test]
    fn frame_ends_with_exactly_one_blank_line() {
        let frame = encode(&StreamEvent::json(json!({"x": 1})).with_kind("update")).unwrap();
        let text = std::str::from_utf8(&frame).unwrap();
        assert!(text.ends_with("\n\n"));
        assert!(!text.ends_with("\n\n\n"));
        // No internal blank line before the terminator.
        let body = &text[..text.len() - 1];
        assert!(!body.contains("\n\n"));
    }

    #[test]
    fn object_key_order_is_deterministic() {
        let a = encode(&StreamEvent::json(json!({"b": 2, "a": 1}))).unwrap();
        let b = encode(&StreamEvent::json(json!({"a": 1, "b": 2}))).unwrap();
        assert_eq!(a, b);
        assert_eq!(&a[..], b"data: {\"a\":1,\"b\":2}\n\n");
    }

    #[test]
    fn comment_frame_has_no_fields() {
        let frame = comment("keep-alive");
        assert_eq!(&frame[..], b": keep-alive\n\n");
    }
}
