//! # CLI
//!
//! Argument parsing and the startup sequence: load config, build and
//! seed the store (failing fast on a bad seed), then hand the store to
//! the server. The store is never ambient global state.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::rest_api::ApiServer;
use crate::store::{MemoryStore, StoreError};

/// mealcart - food-delivery REST backend over a document store
#[derive(Parser, Debug)]
#[command(name = "mealcart")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (falls back to MEALCART_PORT, then 8000)
        #[arg(long)]
        port: Option<u16>,

        /// JSON seed file: collection name -> array of documents
        /// (falls back to MEALCART_SEED)
        #[arg(long)]
        seed: Option<PathBuf>,
    },
}

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("store initialization failed: {0}")]
    Store(#[from] StoreError),

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Parse arguments and dispatch.
pub async fn run() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { host, port, seed } => serve(host, port, seed).await,
    }
}

async fn serve(
    host: Option<String>,
    port: Option<u16>,
    seed: Option<PathBuf>,
) -> Result<(), CliError> {
    let mut config = ServerConfig::from_env();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(seed) = seed {
        config.seed = Some(seed);
    }

    // Acquire the store before the listener binds; a bad seed file
    // stops the process here.
    let store = match &config.seed {
        Some(path) => {
            let store = MemoryStore::from_seed_file(path)?;
            info!(seed = %path.display(), "store seeded");
            store
        }
        None => {
            info!("no seed file, starting with an empty store");
            MemoryStore::new()
        }
    };

    ApiServer::new(config, Arc::new(store)).start().await?;
    Ok(())
}
