//! padron server binary.
//!
//! Loads `.env` if present, reads `padron.toml` (or the path given with
//! `--config`) and `PADRON_*` overrides, opens the SQLite store, and serves the
//! debug app over HTTP until Ctrl-C.

mod config;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use padron_api::{AppState, PeerClient};
use padron_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "padron debug app server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "padron.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // `.env` feeds both RUST_LOG and the PADRON_* overrides.
  let dotenv = dotenvy::dotenv();

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  if let Ok(path) = dotenv {
    tracing::debug!(path = %path.display(), "loaded .env");
  }

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config).with_context(|| {
    format!("failed to load configuration from {:?}", cli.config)
  })?;

  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", server_cfg.store_path)
    })?;

  let peer = PeerClient::new(
    server_cfg.peer_host.clone(),
    server_cfg.peer_port,
    server_cfg.peer_timeout(),
  )
  .context("failed to build peer client")?;

  let state = AppState::new(store, peer, server_cfg.settings());
  let app = padron_api::router(state);
  let address = server_cfg.address();

  tracing::info!(
    service = %server_cfg.service_name,
    peer = %format!("{}:{}", server_cfg.peer_host, server_cfg.peer_port),
    "Listening on http://{address}"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("server stopped");
  Ok(())
}

/// Resolve on Ctrl-C.
async fn shutdown_signal() {
  if let Err(err) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %err, "failed to listen for Ctrl-C");
    std::future::pending::<()>().await;
  }
}
