//! people-server - HTTP CRUD service for person records
//!
//! Serves /people over a pluggable storage backend (in-memory or SQLite)
//! selected at startup.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use people_common::config::{Backend, ConfigOverrides, ServiceConfig};
use people_common::db::init_database;
use people_common::{MemoryStore, PersonRepository, SqliteStore};
use people_server::{build_router, AppState};
use tokio::signal;
use tracing::info;

/// Command-line arguments for people-server
#[derive(Parser, Debug)]
#[command(name = "people-server")]
#[command(about = "HTTP CRUD service for person records")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Storage backend: memory or sqlite
    #[arg(short, long)]
    backend: Option<Backend>,

    /// SQLite database file (sqlite backend only)
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Default log level when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        ConfigOverrides {
            host: args.host,
            port: args.port,
            backend: args.backend,
            db_path: args.db_path,
            log_level: args.log_level,
            config_file: args.config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ServiceConfig::resolve(args.into()).context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "people_server={0},people_common={0},tower_http={0}",
                    config.log_level
                )
                .into()
            }),
        )
        .init();

    info!(
        "Starting people-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let repo: Arc<dyn PersonRepository> = match config.backend {
        Backend::Memory => {
            info!("Using in-memory storage");
            Arc::new(MemoryStore::new())
        }
        Backend::Sqlite => {
            info!("Database path: {}", config.db_path.display());
            let pool = init_database(&config.db_path)
                .await
                .context("Failed to initialize database")?;
            info!("✓ Connected to database");
            Arc::new(SqliteStore::new(pool))
        }
    };

    let app = build_router(AppState::new(repo));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("people-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
