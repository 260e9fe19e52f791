//! SSE response plumbing for streaming sessions.
//!
//! Each connection gets a bounded frame channel: a spawned task drives the
//! session into the sender, and the response body streams from the
//! receiver. Axum drops the body stream when the client goes away, which
//! closes the channel, and the session's probe sees that as a disconnect and
//! its sink sees it as a failed send, so either path closes the session.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header;
use axum::response::Response;
use bytes::Bytes;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

use eventflow_core::{
    DisconnectProbe, EventProducer, FinishReason, FrameSink, ProbeError, SessionConfig,
    SinkClosed, StreamSession,
};

use crate::error::HttpError;

/// Frames buffered between the session task and the HTTP body.
const FRAME_BUFFER: usize = 16;

/// Frame sink backed by the per-connection channel.
pub(crate) struct ChannelSink(mpsc::Sender<Bytes>);

#[async_trait]
impl FrameSink for ChannelSink {
    async fn send(&mut self, frame: Bytes) -> Result<(), SinkClosed> {
        self.0.send(frame).await.map_err(|_| SinkClosed)
    }

    fn try_send(&mut self, frame: Bytes) -> Result<(), SinkClosed> {
        self.0.try_send(frame).map_err(|_| SinkClosed)
    }
}

/// Disconnect probe backed by the same channel.
pub(crate) struct ChannelProbe(mpsc::Sender<Bytes>);

#[async_trait]
impl DisconnectProbe for ChannelProbe {
    async fn is_disconnected(&mut self) -> Result<bool, ProbeError> {
        Ok(self.0.is_closed())
    }
}

/// Spawn a session task driving `producer` and return the streaming
/// response for it.
pub fn stream_response<P>(
    producer: P,
    config: SessionConfig,
    cancel: CancellationToken,
) -> Result<Response, HttpError>
where
    P: EventProducer + Sync + 'static,
{
    let (tx, rx) = mpsc::channel::<Bytes>(FRAME_BUFFER);
    let probe = ChannelProbe(tx.clone());
    let mut sink = ChannelSink(tx);

    tokio::spawn(async move {
        let session = StreamSession::new(producer, probe, config).with_cancellation(cancel);
        let outcome = session.run(&mut sink).await;
        match outcome.reason {
            FinishReason::Failed(err) => {
                tracing::error!(
                    error = %err,
                    events = outcome.events_emitted,
                    "stream session failed"
                );
            }
            reason => {
                tracing::info!(
                    ?reason,
                    events = outcome.events_emitted,
                    "stream session closed"
                );
            }
        }
    });

    let body = Body::from_stream(ReceiverStream::new(rx).map(Ok::<_, Infallible>));
    Response::builder()
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        // Disable intermediary buffering so frames are delivered promptly.
        .header("x-accel-buffering", "no")
        .body(body)
        .map_err(|err| HttpError::Internal(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channel_probe_observes_dropped_receiver() {
        let (tx, rx) = mpsc::channel::<Bytes>(1);
        let mut probe = ChannelProbe(tx);
        assert!(!probe.is_disconnected().await.unwrap());

        drop(rx);
        assert!(probe.is_disconnected().await.unwrap());
    }

    #[tokio::test]
    async fn channel_sink_fails_after_receiver_drop() {
        let (tx, rx) = mpsc::channel::<Bytes>(1);
        let mut sink = ChannelSink(tx);
        assert!(sink.send(Bytes::from_static(b"ok")).await.is_ok());

        drop(rx);
        assert!(sink.send(Bytes::from_static(b"lost")).await.is_err());
        assert!(sink.try_send(Bytes::from_static(b"lost")).is_err());
    }
}
