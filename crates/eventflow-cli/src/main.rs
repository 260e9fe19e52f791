//! CLI entry point - the composition root.
//!
//! Parses flags, initializes logging, and hands a root cancellation token
//! to the server so ctrl-c shuts down every live stream before the
//! listener drains.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use eventflow_axum::{ServerConfig, start_server};

#[derive(Debug, Parser)]
#[command(name = "eventflow", version, about = "SSE streaming demo server")]
struct Cli {
    /// Port for the HTTP server.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Directory of static assets to serve alongside the streams.
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Allowed CORS origin (repeatable). All origins are allowed when omitted.
    #[arg(long = "allow-origin")]
    allow_origins: Vec<String>,

    /// Seed for the demo producers' random source, for reproducible streams.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables (RUST_LOG etc.) before logging starts
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ServerConfig::with_defaults().with_port(cli.port);
    if let Some(static_dir) = cli.static_dir {
        config = config.with_static_dir(static_dir);
    }
    if !cli.allow_origins.is_empty() {
        config = config.with_allowed_origins(cli.allow_origins);
    }
    if let Some(seed) = cli.seed {
        config = config.with_rng_seed(seed);
    }

    // One root token: ctrl-c cancels every live session, then the listener drains.
    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown requested");
            shutdown.cancel();
        }
    });

    start_server(config, cancel).await
}
