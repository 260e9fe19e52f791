//! Keep-alive policy.
//!
//! Cadence is count-based: one comment frame after every `every` event
//! frames. Comment frames are protocol noise; they never consume sequence
//! ids and are not counted among the session's emitted events.

use std::num::NonZeroU32;

/// Default cadence: one comment after every 15 event frames.
pub const DEFAULT_HEARTBEAT_EVERY: NonZeroU32 = NonZeroU32::new(15).unwrap();

/// Keep-alive comment cadence and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatPolicy {
    /// Emit one comment frame after this many event frames.
    pub every: NonZeroU32,
    /// Comment text; ignored by conforming clients.
    pub text: String,
}

impl HeartbeatPolicy {
    /// Create a policy with the given cadence and default text.
    #[must_use]
    pub fn new(every: NonZeroU32) -> Self {
        Self {
            every,
            text: "keep-alive".to_string(),
        }
    }

    /// Set the comment text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

impl Default for HeartbeatPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_HEARTBEAT_EVERY)
    }
}

/// Per-session tuning.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Keep-alive policy; `None` disables comment frames entirely.
    pub heartbeat: Option<HeartbeatPolicy>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::with_heartbeat(HeartbeatPolicy::default())
    }
}

impl SessionConfig {
    /// Config with no keep-alive traffic.
    #[must_use]
    pub const fn without_heartbeat() -> Self {
        Self { heartbeat: None }
    }

    /// Config with the given keep-alive policy.
    #[must_use]
    pub const fn with_heartbeat(heartbeat: HeartbeatPolicy) -> Self {
        Self {
            heartbeat: Some(heartbeat),
        }
    }
}
