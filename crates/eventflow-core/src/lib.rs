//! Core streaming engine: SSE frame encoding and the session state machine.
//!
//! This crate is transport-agnostic. The HTTP layer supplies a producer of
//! events, a disconnect probe and a frame sink; the session does the rest:
//! pacing, encoding, keep-alives and clean termination. No axum types leak
//! in here.

#![deny(unused_crate_dependencies)]

pub mod error;
pub mod event;
pub mod frame;
pub mod heartbeat;
pub mod probe;
pub mod producer;
pub mod session;
pub mod sink;

// Re-export commonly used types for convenience
pub use error::{EncodeError, ProbeError, ProducerError, SessionError, SinkClosed};
pub use event::StreamEvent;
pub use frame::{comment, encode};
pub use heartbeat::{DEFAULT_HEARTBEAT_EVERY, HeartbeatPolicy, SessionConfig};
pub use probe::{AlwaysConnected, DisconnectProbe};
pub use producer::EventProducer;
pub use session::{FinishReason, SessionOutcome, SessionState, StreamSession};
pub use sink::FrameSink;
