//! Axum web adapter for the eventflow streaming engine.
//!
//! Exposes the five demo streaming endpoints over SSE, wires client
//! disconnection and server shutdown into the core session's probe and
//! cancellation ports, and serves the optional static demo frontend.

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod producers;
pub mod routes;
pub mod sse;
pub mod state;

// Re-export primary types
pub use bootstrap::{
    AxumContext, CorsConfig, ServerConfig, StreamSettings, bootstrap, start_server,
};
pub use error::HttpError;
pub use routes::{create_router, create_spa_router};
pub use state::AppState;
