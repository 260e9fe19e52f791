//! Streaming session state machine.
//!
//! One session per client connection, driven by exactly one task. The
//! session pulls events from its producer, encodes them, writes them to the
//! frame sink, and injects keep-alive comments at the configured cadence.
//! It terminates on producer exhaustion, client disconnect, cancellation,
//! or the first producer/encoding failure, always reporting an explicit
//! [`FinishReason`] rather than propagating a raw error into a response
//! whose headers are already committed.

use bytes::Bytes;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::error::{ProducerError, SessionError, SinkClosed};
use crate::event::StreamEvent;
use crate::frame;
use crate::heartbeat::SessionConfig;
use crate::probe::DisconnectProbe;
use crate::producer::EventProducer;
use crate::sink::FrameSink;

/// Session lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Constructed, producer not yet polled.
    Starting,
    /// Pulling, encoding and emitting events.
    Streaming,
    /// Producer exhausted; emitting the terminal event if there is one.
    Draining,
    /// Terminal. No further frames.
    Closed,
}

/// Why a session ended.
#[derive(Debug)]
pub enum FinishReason {
    /// The producer ran out of events.
    Exhausted,
    /// The client went away (or the probe/sink broke, which we treat the
    /// same way).
    Disconnected,
    /// The owning layer cancelled the session.
    Cancelled,
    /// A producer or encoding failure ended the stream.
    Failed(SessionError),
}

/// Final report of a finished session.
#[derive(Debug)]
pub struct SessionOutcome {
    /// The termination path taken.
    pub reason: FinishReason,
    /// Event frames emitted while streaming. Keep-alive comments and the
    /// terminal frame are not counted.
    pub events_emitted: u64,
}

enum Pulled {
    Cancelled,
    Ready(Result<Option<StreamEvent>, ProducerError>),
}

enum EmitAbort {
    SinkClosed,
    Cancelled,
    Failed(SessionError),
}

enum SendResult {
    Sent,
    Closed,
    Cancelled,
}

/// The lifecycle of one client connection's event stream.
///
/// Single-writer: the session owns its producer, probe and counters, and
/// only its own driving loop mutates them. Dropping the session releases
/// the producer and probe on every exit path.
pub struct StreamSession<P, D> {
    producer: P,
    probe: D,
    config: SessionConfig,
    cancel: CancellationToken,
    state: SessionState,
    emitted: u64,
    ticks: u32,
}

impl<P: EventProducer, D: DisconnectProbe> StreamSession<P, D> {
    /// Create a session bound to a producer and a disconnect probe.
    pub fn new(producer: P, probe: D, config: SessionConfig) -> Self {
        Self {
            producer,
            probe,
            config,
            cancel: CancellationToken::new(),
            state: SessionState::Starting,
            emitted: 0,
            ticks: 0,
        }
    }

    /// Bind the session to an external cancellation token. Cancelling it
    /// aborts a suspended producer pull and closes the session within a
    /// bounded delay.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Drive the session to completion, writing frames to `sink`.
    pub async fn run<S: FrameSink>(mut self, sink: &mut S) -> SessionOutcome {
        // STARTING does no blocking work.
        self.state = SessionState::Streaming;
        tracing::debug!("session streaming");

        let reason = self.stream_loop(sink).await;

        self.state = SessionState::Closed;
        tracing::debug!(events = self.emitted, "session closed");
        SessionOutcome {
            reason,
            events_emitted: self.emitted,
        }
    }

    async fn stream_loop<S: FrameSink>(&mut self, sink: &mut S) -> FinishReason {
        loop {
            if self.cancel.is_cancelled() {
                return self.interrupted(sink);
            }

            match self.probe.is_disconnected().await {
                Ok(false) => {}
                Ok(true) => {
                    tracing::debug!("client disconnected");
                    return FinishReason::Disconnected;
                }
                Err(err) => {
                    // Fail safe toward closing rather than looping.
                    tracing::warn!(error = %err, "probe failed, treating as disconnected");
                    return FinishReason::Disconnected;
                }
            }

            let pulled = tokio::select! {
                biased;
                () = self.cancel.cancelled() => Pulled::Cancelled,
                result = self.producer.next_event() => Pulled::Ready(result),
            };

            match pulled {
                Pulled::Cancelled => return self.interrupted(sink),
                Pulled::Ready(Ok(Some(event))) => match self.emit_event(event, sink).await {
                    Ok(()) => {}
                    Err(EmitAbort::SinkClosed) => return FinishReason::Disconnected,
                    Err(EmitAbort::Cancelled) => return self.interrupted(sink),
                    Err(EmitAbort::Failed(err)) => return self.failed(err, sink).await,
                },
                Pulled::Ready(Ok(None)) => {
                    self.state = SessionState::Draining;
                    return self.drain(sink).await;
                }
                Pulled::Ready(Err(err)) => return self.failed(err.into(), sink).await,
            }
        }
    }

    /// Encode and emit one event frame, then a keep-alive comment if the
    /// cadence is due. Each event is emitted at most once; a closed sink
    /// aborts before the emitted count advances past delivered frames.
    async fn emit_event<S: FrameSink>(
        &mut self,
        mut event: StreamEvent,
        sink: &mut S,
    ) -> Result<(), EmitAbort> {
        let seq = self.emitted + 1;
        if event.id.is_none() {
            event.id = Some(seq.to_string());
        }

        let frame = frame::encode(&event).map_err(|err| EmitAbort::Failed(err.into()))?;
        match self.guarded_send(sink, frame).await {
            SendResult::Sent => {}
            SendResult::Closed => return Err(EmitAbort::SinkClosed),
            SendResult::Cancelled => return Err(EmitAbort::Cancelled),
        }
        self.emitted = seq;

        if let Some(policy) = &self.config.heartbeat {
            self.ticks += 1;
            if self.ticks >= policy.every.get() {
                self.ticks = 0;
                match self.guarded_send(sink, frame::comment(&policy.text)).await {
                    SendResult::Sent => {}
                    SendResult::Closed => return Err(EmitAbort::SinkClosed),
                    SendResult::Cancelled => return Err(EmitAbort::Cancelled),
                }
            }
        }
        Ok(())
    }

    /// Write one frame, giving up if cancellation fires before the sink
    /// accepts it. A slow consumer can delay frames; it must never delay
    /// shutdown.
    async fn guarded_send<S: FrameSink>(&self, sink: &mut S, frame: Bytes) -> SendResult {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => SendResult::Cancelled,
            result = sink.send(frame) => match result {
                Ok(()) => SendResult::Sent,
                Err(SinkClosed) => SendResult::Closed,
            },
        }
    }

    /// Emit the producer's terminal event, if any, then close. The terminal
    /// frame is passed through as the producer built it, with no auto id.
    async fn drain<S: FrameSink>(&mut self, sink: &mut S) -> FinishReason {
        tracing::debug!(events = self.emitted, "producer exhausted, draining");
        if let Some(event) = self.producer.final_event() {
            match frame::encode(&event) {
                Ok(frame) => match self.guarded_send(sink, frame).await {
                    SendResult::Sent => {}
                    SendResult::Closed => tracing::debug!("consumer gone before terminal frame"),
                    SendResult::Cancelled => tracing::debug!("cancelled while draining"),
                },
                Err(err) => tracing::warn!(error = %err, "terminal event failed to encode"),
            }
        }
        FinishReason::Exhausted
    }

    /// Cancellation path: one best-effort interrupt frame, never blocking
    /// on pending I/O.
    fn interrupted<S: FrameSink>(&mut self, sink: &mut S) -> FinishReason {
        tracing::debug!(events = self.emitted, "session cancelled");
        if let Some(event) = self.producer.interrupt_event() {
            if let Ok(frame) = frame::encode(&event) {
                let _ = sink.try_send(frame);
            }
        }
        FinishReason::Cancelled
    }

    /// Failure path: the response is already streaming, so the error is
    /// folded into one in-band `event: error` frame and returned in the
    /// outcome for the owner's fault reporting.
    async fn failed<S: FrameSink>(&mut self, err: SessionError, sink: &mut S) -> FinishReason {
        tracing::error!(error = %err, "stream failed, closing session");
        let event = StreamEvent::json(json!({ "error": err.to_string() })).with_kind("error");
        if let Ok(frame) = frame::encode(&event) {
            let _ = self.guarded_send(sink, frame).await;
        }
        FinishReason::Failed(err)
    }
}
