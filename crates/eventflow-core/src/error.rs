//! Error taxonomy for the streaming engine.
//!
//! Disconnection and cancellation are not errors; they are normal
//! termination paths reported through `FinishReason`. Only encoding and
//! producer failures carry error values.

use thiserror::Error;

/// A payload could not be serialized to wire text.
///
/// This is a programmer error that well-formed producers never trigger,
/// but it must never silently drop data.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The payload has no canonical textual form.
    #[error("payload has no textual form: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A producer failed while being pulled for its next event.
#[derive(Debug, Error)]
#[error("producer failed: {0}")]
pub struct ProducerError(String);

impl ProducerError {
    /// Create a producer error with a description.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The disconnect probe itself failed.
///
/// The session treats this as "disconnected", failing safe toward closing
/// rather than looping on a broken probe.
#[derive(Debug, Error)]
#[error("disconnect probe failed: {0}")]
pub struct ProbeError(String);

impl ProbeError {
    /// Create a probe error with a description.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The frame sink's consumer is gone; no further frames can be written.
#[derive(Debug, Error)]
#[error("frame sink closed")]
pub struct SinkClosed;

/// An error that terminates a streaming session.
///
/// Surfaced to the client as a single `event: error` frame, then the
/// session closes. Returned in the session outcome so the owning task can
/// report it.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An event payload could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The producer failed during a pull.
    #[error(transparent)]
    Producer(#[from] ProducerError),
}
