//! Integration tests for the streaming endpoints.
//!
//! These drive the router with `tower::oneshot` and read whole response
//! bodies; the `fast()` settings zero every pacing interval so finite
//! streams complete immediately.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use eventflow_axum::bootstrap::{CorsConfig, ServerConfig, StreamSettings, bootstrap};
use eventflow_axum::routes::create_router;

fn test_router() -> Router {
    let config = ServerConfig::with_defaults()
        .with_rng_seed(42)
        .with_settings(StreamSettings::fast());
    let ctx = bootstrap(&config, CancellationToken::new());
    create_router(ctx, &CorsConfig::AllowAll)
}

async fn fetch(uri: &str) -> (axum::http::response::Parts, String) {
    let response = test_router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    (parts, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Split a response body into SSE frames (blank-line delimited).
fn frames(body: &str) -> Vec<&str> {
    body.split_terminator("\n\n").collect()
}

fn frames_of_kind<'a>(frames: &[&'a str], kind: &str) -> Vec<&'a str> {
    let prefix = format!("event: {kind}\n");
    frames
        .iter()
        .filter(|frame| frame.starts_with(&prefix))
        .copied()
        .collect()
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let (parts, body) = fetch("/health").await;
    assert_eq!(parts.status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn basic_stream_sets_sse_headers() {
    let (parts, _body) = fetch("/stream/basic").await;
    assert_eq!(parts.status, StatusCode::OK);
    assert_eq!(
        parts.headers.get(header::CONTENT_TYPE).unwrap(),
        "text/event-stream"
    );
    assert_eq!(parts.headers.get(header::CACHE_CONTROL).unwrap(), "no-cache");
    assert_eq!(parts.headers.get(header::CONNECTION).unwrap(), "keep-alive");
    assert_eq!(parts.headers.get("x-accel-buffering").unwrap(), "no");
}

#[tokio::test]
async fn basic_stream_emits_counter_frames_and_heartbeats() {
    let (_parts, body) = fetch("/stream/basic").await;
    let frames = frames(&body);

    let updates = frames_of_kind(&frames, "update");
    assert_eq!(updates.len(), 30);
    assert!(updates[0].contains("id: 1\n"));
    assert!(updates[0].contains("\"count\":1"));
    assert!(updates[29].contains("id: 30\n"));

    // Count-based cadence of 15 over 30 events.
    let comments: Vec<_> = frames
        .iter()
        .filter(|frame| frame.starts_with(": heartbeat"))
        .collect();
    assert_eq!(comments.len(), 2);

    let done = frames.last().unwrap();
    assert!(done.starts_with("event: done\n"));
    assert!(done.contains("\"total\":30"));
}

#[tokio::test]
async fn log_stream_replays_canned_entries_then_eof() {
    let (_parts, body) = fetch("/stream/logs").await;
    let frames = frames(&body);

    let logs = frames_of_kind(&frames, "log");
    assert_eq!(logs.len(), 8);
    assert!(logs[0].contains("id: 1\n"));
    assert!(logs[0].contains("\"message\":\"Application started\""));
    for frame in &logs {
        assert!(frame.contains("\"level\":\""));
    }

    let complete = frames.last().unwrap();
    assert!(complete.starts_with("event: complete\n"));
    assert!(complete.contains("\"status\":\"EOF\""));
}

#[tokio::test]
async fn seeded_log_streams_replay_identical_levels() {
    fn levels(body: &str) -> Vec<String> {
        body.lines()
            .filter_map(|line| {
                let (_, rest) = line.split_once("\"level\":\"")?;
                Some(rest.split('"').next().unwrap_or_default().to_string())
            })
            .collect()
    }

    let (_parts, first) = fetch("/stream/logs").await;
    let (_parts, second) = fetch("/stream/logs").await;
    assert_eq!(levels(&first), levels(&second));
    assert_eq!(levels(&first).len(), 8);
}

#[tokio::test]
async fn progress_stream_walks_to_one_hundred_percent() {
    let (_parts, body) = fetch("/stream/progress").await;
    let frames = frames(&body);

    let steps = frames_of_kind(&frames, "progress");
    assert_eq!(steps.len(), 7);
    assert!(steps[0].contains("\"percentage\":14.29"));
    assert!(steps[6].contains("\"percentage\":100.0"));
    // No terminal frame on this endpoint; the last progress step is the end.
    assert_eq!(frames.len(), 7);
}

#[tokio::test]
async fn multi_stream_mixes_kinds_with_keepalives() {
    let (_parts, body) = fetch("/stream/multi").await;
    let frames = frames(&body);

    assert!(frames[0].starts_with("event: connected\n"));
    assert!(!frames_of_kind(&frames, "status").is_empty());
    assert!(!frames_of_kind(&frames, "metrics").is_empty());
    assert!(!frames_of_kind(&frames, "update").is_empty());
    assert_eq!(frames_of_kind(&frames, "warning").len(), 1);
    assert!(frames.iter().any(|frame| frame.starts_with(": keep-alive")));
    assert!(frames.last().unwrap().starts_with("event: complete\n"));
}

#[tokio::test]
async fn chat_stream_chunks_the_response() {
    let (_parts, body) = fetch("/stream/chat?message=hello").await;
    let frames = frames(&body);

    let chunks = frames_of_kind(&frames, "chunk");
    assert!(!chunks.is_empty());
    assert!(chunks[0].contains("\"chunk\":\"Thanks \""));
    assert!(chunks.last().unwrap().contains("\"is_final\":true"));

    let done = frames.last().unwrap();
    assert!(done.starts_with("event: done\n"));
    assert!(done.contains("'hello'"));
    assert!(done.contains(&format!("\"tokens\":{}", chunks.len())));
}

#[tokio::test]
async fn chat_stream_defaults_the_seed_message() {
    let (parts, body) = fetch("/stream/chat").await;
    assert_eq!(parts.status, StatusCode::OK);
    assert!(body.contains("'Hello, how are you?'"));
}

#[tokio::test]
async fn oversized_chat_message_is_rejected_before_streaming() {
    let uri = format!("/stream/chat?message={}", "a".repeat(2001));
    let (parts, body) = fetch(&uri).await;
    assert_eq!(parts.status, StatusCode::BAD_REQUEST);
    assert!(body.contains("\"error\""));
}

#[tokio::test]
async fn every_frame_is_terminated_by_a_single_blank_line() {
    let (_parts, body) = fetch("/stream/multi").await;
    assert!(body.ends_with("\n\n"));
    // A doubled delimiter anywhere would mean an empty frame slipped out.
    assert!(!body.contains("\n\n\n"));
}
