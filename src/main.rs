//! bookshelf - book catalog HTTP service
//!
//! Serves the legacy BooksService surface (authors, categories, publishers,
//! books, detailed books) from a SQLite or in-memory record store.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;

use bookshelf::catalog::Catalog;
use bookshelf::config::{Cli, Config, StoreBackend};
use bookshelf::store::{MemoryStore, RecordStore, SqliteStore};
use bookshelf::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting bookshelf v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let cli = Cli::parse();
    let config = Config::resolve(&cli)?;

    let store: Arc<dyn RecordStore> = match config.store {
        StoreBackend::Sqlite => {
            info!("Record store: sqlite at {}", config.database.display());
            let store = SqliteStore::open(&config.database, config.seed)
                .await
                .context("Failed to open record store")?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            info!("Record store: in-memory (state is lost on shutdown)");
            if config.seed {
                Arc::new(MemoryStore::with_demo_data())
            } else {
                Arc::new(MemoryStore::new())
            }
        }
    };

    if config.strict {
        info!("Strict mode: dangling book references fail requests");
    }

    let catalog = Catalog::new(store).with_strict(config.strict);
    let state = AppState::new(catalog);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .context("Failed to bind to address")?;
    info!("bookshelf listening on http://{}", config.listen);
    info!("Health check: http://{}/health", config.listen);

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
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
