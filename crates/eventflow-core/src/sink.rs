//! Frame sink port.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::SinkClosed;

/// Where encoded frames go: the transport layer's output side.
///
/// The session owns the right to write frames to the sink until it closes;
/// it does not own the underlying connection. The transport must deliver
/// frames in send order without coalescing across frame boundaries.
#[async_trait]
pub trait FrameSink: Send {
    /// Deliver one frame, waiting for capacity if the consumer is slow.
    /// Fails once the consumer is gone.
    async fn send(&mut self, frame: Bytes) -> Result<(), SinkClosed>;

    /// Deliver one frame only if it can be done without waiting.
    ///
    /// Used for best-effort frames during cancellation, which must not be
    /// delayed by pending I/O.
    fn try_send(&mut self, frame: Bytes) -> Result<(), SinkClosed>;
}
