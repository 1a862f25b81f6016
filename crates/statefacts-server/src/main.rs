//! statefacts server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), loads the
//! state dataset, opens the SQLite fun-fact store and serves the JSON API.
//!
//! # Seeding
//!
//! Fun facts can only be added to states that already have a document. Create
//! one per state (optionally with initial facts) before serving:
//!
//! ```sh
//! cargo run -p statefacts-server -- seed --from facts.json
//! ```

mod seed;
mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use statefacts_api::AppState;
use statefacts_core::dataset::ReferenceDataset;
use statefacts_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "US state reference data with fun facts")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the HTTP API (the default).
  Serve,
  /// Create a fun-fact document for every state and exit.
  Seed {
    /// JSON file of initial facts, e.g. `{"KS": ["..."]}`.
    #[arg(long)]
    from: Option<PathBuf>,
  },
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
  let server_cfg = ServerConfig::load(&cli.config)?;

  let dataset = match &server_cfg.dataset_path {
    Some(path) => ReferenceDataset::load(path)
      .with_context(|| format!("failed to load dataset from {path:?}"))?,
    None => ReferenceDataset::bundled().context("bundled dataset is invalid")?,
  };
  tracing::info!(states = dataset.len(), "loaded reference dataset");

  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.store_path))?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::Seed { from } => {
      let facts = from
        .as_deref()
        .map(seed::read_facts)
        .transpose()?
        .unwrap_or_default();
      seed::seed(&store, &dataset, facts).await?;
    }
    Command::Serve => {
      let state = AppState {
        store:   Arc::new(store),
        dataset: Arc::new(dataset),
      };
      let app = statefacts_api::api_router(state);
      let address = server_cfg.address();

      tracing::info!("Listening on http://{address}");
      let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

      axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    }
  }

  Ok(())
}

/// Resolve on Ctrl-C so in-flight requests can finish.
async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %e, "failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
