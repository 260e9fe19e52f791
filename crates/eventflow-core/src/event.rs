//! The logical event delivered to a client.

use serde_json::Value;

/// One unit of application data to be delivered over a stream.
///
/// This is a lightweight value type: producers build events, the session
/// encodes and forgets them. The payload is an arbitrary JSON value;
/// `Value::String` payloads are written to the wire verbatim (no quoting),
/// everything else is serialized to its canonical single-line JSON form.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEvent {
    /// Structured payload or scalar text.
    pub payload: Value,
    /// Short discriminator used by the client to dispatch handling
    /// (the SSE `event:` field).
    pub kind: Option<String>,
    /// Sequence id for resumption (the SSE `id:` field). When absent the
    /// session assigns one from its per-session counter.
    pub id: Option<String>,
    /// Suggested client reconnect delay (the SSE `retry:` field).
    pub retry_ms: Option<u64>,
}

impl StreamEvent {
    /// Create an event with a structured JSON payload.
    #[must_use]
    pub const fn json(payload: Value) -> Self {
        Self {
            payload,
            kind: None,
            id: None,
            retry_ms: None,
        }
    }

    /// Create an event with a plain text payload.
    ///
    /// The text is emitted as-is on `data:` lines; embedded newlines become
    /// one `data:` line per payload line.
    #[must_use]
    pub fn text(payload: impl Into<String>) -> Self {
        Self::json(Value::String(payload.into()))
    }

    /// Set the event kind (SSE `event:` field).
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the sequence id (SSE `id:` field).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the suggested client reconnect delay in milliseconds.
    #[must_use]
    pub const fn with_retry_ms(mut self, retry_ms: u64) -> Self {
        self.retry_ms = Some(retry_ms);
        self
    }
}
