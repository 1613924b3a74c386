//! `cafe-wifi`: serve the cafe catalogue.
//!
//! Usage:
//!   cafe-wifi [-c <config.toml>] [--listen <addr>] [--db <path>]

use std::path::PathBuf;

use clap::Parser;

use app_lib::config::ServerConfig;

/// Cafe & Wifi server.
#[derive(Parser, Debug)]
#[command(name = "cafe-wifi", about = "Catalogue of laptop-friendly cafes", version)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Listen address (overrides the config file).
    #[arg(long = "listen")]
    listen: Option<String>,

    /// SQLite database file (overrides the config file).
    #[arg(long = "db")]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging. `log` records from the library are bridged in.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            ServerConfig::load(path)?
        }
        None => ServerConfig::default(),
    };
    if let Some(listen) = cli.listen {
        config.listen = listen;
    }
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    app_lib::run(config).await
}
