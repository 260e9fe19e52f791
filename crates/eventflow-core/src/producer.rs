//! Event producer port.
//!
//! Producers are the source of application events consumed by a session.
//! They pace themselves by suspending inside `next_event` (e.g. sleeping
//! one second between counter ticks); the session cancels a pending pull
//! at its own suspension point, so pacing never delays shutdown.

use async_trait::async_trait;

use crate::error::ProducerError;
use crate::event::StreamEvent;

/// A lazy, finite-or-infinite sequence of events.
///
/// `Ok(None)` signals exhaustion. A producer must tolerate being abandoned
/// after any call; the session drops it on disconnect and cancellation
/// without further cleanup.
#[async_trait]
pub trait EventProducer: Send {
    /// Pull the next event, suspending for the producer's pacing interval
    /// if it has one. Returns `Ok(None)` once the sequence is exhausted.
    async fn next_event(&mut self) -> Result<Option<StreamEvent>, ProducerError>;

    /// Terminal event emitted while the session drains after exhaustion
    /// (e.g. a `done` marker). Default: none.
    fn final_event(&mut self) -> Option<StreamEvent> {
        None
    }

    /// Best-effort event emitted when the session is cancelled mid-stream.
    /// Sent without blocking; may be dropped. Default: none.
    fn interrupt_event(&mut self) -> Option<StreamEvent> {
        None
    }
}
