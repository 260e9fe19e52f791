//! Shared application state type.

use crate::bootstrap::AxumContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// An Arc-wrapped [`AxumContext`] holding the stream settings, the RNG
/// seed for demo producers, and the root cancellation token.
pub type AppState = Arc<AxumContext>;
