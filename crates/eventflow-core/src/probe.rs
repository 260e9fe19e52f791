//! Disconnect probe port.

use async_trait::async_trait;

use crate::error::ProbeError;

/// A check, supplied by the transport layer, for whether the remote client
/// has closed the connection.
///
/// Consulted once per session loop iteration, so implementations must be
/// cheap and safe to call repeatedly. The check may suspend (waiting on a
/// transport notification) or poll without suspending; both work. A probe
/// error is treated by the session as "disconnected".
#[async_trait]
pub trait DisconnectProbe: Send {
    /// Returns `Ok(true)` once the client is gone.
    async fn is_disconnected(&mut self) -> Result<bool, ProbeError>;
}

/// A probe that never reports disconnection.
///
/// For tests and contexts where the transport has no disconnect signal and
/// termination comes from producer exhaustion or cancellation alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConnected;

#[async_trait]
impl DisconnectProbe for AlwaysConnected {
    async fn is_disconnected(&mut self) -> Result<bool, ProbeError> {
        Ok(false)
    }
}
