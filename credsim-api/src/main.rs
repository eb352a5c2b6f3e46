//! credsim HTTP server
//!
//! Serves the people and credit simulation API over a SQLite database.
//!
//! Usage:
//!   credsim --bind 0.0.0.0:8080 --database credsim.db

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use credsim_api::build_router;
use credsim_storage::SqliteStore;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "credsim")]
#[command(about = "People and credit simulation REST API")]
struct Args {
    /// Address to listen on
    #[arg(short, long, env = "CREDSIM_BIND", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// SQLite database file (`:memory:` for a throwaway store)
    #[arg(short, long, env = "CREDSIM_DATABASE", default_value = "credsim.db")]
    database: PathBuf,

    /// Disable the permissive CORS layer
    #[arg(long)]
    no_cors: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("credsim starting...");
    let store = SqliteStore::open(&args.database)
        .with_context(|| format!("Failed to open database {}", args.database.display()))?;

    let mut app = build_router(Arc::new(store));
    if !args.no_cors {
        app = app.layer(CorsLayer::permissive());
    }

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    info!(addr = %args.bind, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down gracefully"),
        () = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
