//! folio-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), then serves the
//! contact API over HTTP. `RESEND_API_KEY` and `CONTACT_EMAIL` are consulted
//! on every request; leave either unset to run in log-only mode.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use folio_server::{EnvConfig, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Portfolio contact API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  let source = EnvConfig::new(server_cfg.delivery());
  if !folio_api::ConfigSource::delivery(&source).is_configured() {
    tracing::warn!(
      "RESEND_API_KEY or CONTACT_EMAIL not set; submissions will only be logged"
    );
  }

  let app = folio_server::app(&server_cfg, source)?;
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
