//! Server bootstrap - the composition root.
//!
//! This module is the ONLY place where the web adapter is wired together:
//! configuration, shared context, listener and graceful shutdown.

use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use eventflow_core::DEFAULT_HEARTBEAT_EVERY;

use crate::routes::{create_router, create_spa_router};

/// Keep-alive cadence on the mixed-event stream.
const DEFAULT_MULTI_HEARTBEAT_EVERY: NonZeroU32 = NonZeroU32::new(5).unwrap();

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Pacing and cadence knobs for the demo streams.
///
/// Defaults match the classic demo behavior; `fast()` zeroes every pacing
/// interval so integration tests finish immediately.
#[derive(Debug, Clone)]
pub struct StreamSettings {
    /// Number of counter ticks before `/stream/basic` completes.
    pub counter_limit: u32,
    /// Delay between counter ticks.
    pub counter_interval: Duration,
    /// Delay between log entries.
    pub log_interval: Duration,
    /// Delay between progress steps.
    pub progress_interval: Duration,
    /// Number of mixed-event rounds on `/stream/multi`.
    pub multi_rounds: u32,
    /// Delay between mixed-event rounds.
    pub multi_interval: Duration,
    /// Delay between chat chunks.
    pub chat_interval: Duration,
    /// Keep-alive cadence on `/stream/basic`, counted in event frames.
    pub heartbeat_every: NonZeroU32,
    /// Keep-alive cadence on `/stream/multi`, counted in event frames.
    pub multi_heartbeat_every: NonZeroU32,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            counter_limit: 30,
            counter_interval: Duration::from_secs(1),
            log_interval: Duration::from_millis(500),
            progress_interval: Duration::from_secs(2),
            multi_rounds: 20,
            multi_interval: Duration::from_secs(1),
            chat_interval: Duration::from_millis(100),
            heartbeat_every: DEFAULT_HEARTBEAT_EVERY,
            multi_heartbeat_every: DEFAULT_MULTI_HEARTBEAT_EVERY,
        }
    }
}

impl StreamSettings {
    /// Settings with all pacing intervals zeroed, for tests.
    #[must_use]
    pub fn fast() -> Self {
        Self {
            counter_interval: Duration::ZERO,
            log_interval: Duration::ZERO,
            progress_interval: Duration::ZERO,
            multi_interval: Duration::ZERO,
            chat_interval: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Optional path to static assets for SPA serving.
    pub static_dir: Option<PathBuf>,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Seed for the demo producers' random source. `None` seeds from
    /// entropy; setting it makes streams reproducible.
    pub rng_seed: Option<u64>,
    /// Pacing and cadence knobs.
    pub settings: StreamSettings,
}

impl ServerConfig {
    /// Create config with defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            port: 8000,
            static_dir: None,
            cors: CorsConfig::default(),
            rng_seed: None,
            settings: StreamSettings::default(),
        }
    }

    /// Set the port to listen on.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the static directory for SPA serving.
    #[must_use]
    pub fn with_static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(path.into());
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    /// Seed the demo producers' random source.
    #[must_use]
    pub const fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Replace the stream settings.
    #[must_use]
    pub fn with_settings(mut self, settings: StreamSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// Application context for the Axum adapter.
///
/// Holds everything handlers need: stream settings, the RNG seed, and the
/// root cancellation token whose child tokens cancel individual sessions.
#[derive(Debug)]
pub struct AxumContext {
    /// Pacing and cadence knobs for the demo streams.
    pub settings: StreamSettings,
    /// Seed for demo producer randomness.
    pub rng_seed: Option<u64>,
    /// Root cancellation token; tripped on server shutdown.
    pub cancel: CancellationToken,
}

/// Assemble the shared context from configuration.
#[must_use]
pub fn bootstrap(config: &ServerConfig, cancel: CancellationToken) -> AxumContext {
    AxumContext {
        settings: config.settings.clone(),
        rng_seed: config.rng_seed,
        cancel,
    }
}

/// Start the web server on the configured port.
///
/// Runs until `cancel` is triggered; cancellation propagates to every live
/// streaming session before the listener drains.
pub async fn start_server(config: ServerConfig, cancel: CancellationToken) -> Result<()> {
    let ctx = bootstrap(&config, cancel.clone());

    // Choose router based on whether static serving is configured
    let app = if let Some(ref static_dir) = config.static_dir {
        info!("Serving static assets from: {}", static_dir.display());
        create_spa_router(ctx, static_dir, &config.cors)
    } else {
        create_router(ctx, &config.cors)
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("eventflow listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;

    info!("server shut down");
    Ok(())
}
