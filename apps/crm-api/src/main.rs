//! # CRM API Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CRM API Startup                                 │
//! │                                                                         │
//! │  ApiConfig::load ──► tracing ──► Store ──► GraphQL schema ──► axum     │
//! │                                   │                                     │
//! │                        sqlite (migrations run) | memory                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use anyhow::Context;
use crm_api::{serve, ApiConfig, StoreBackend};
use crm_db::{Database, DbConfig, MemoryStore, Store};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::load().context("Failed to load configuration")?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Starting CRM API server...");
    info!(
        port = config.port,
        store = ?config.store,
        "Configuration loaded"
    );

    let store: Arc<dyn Store> = match config.store {
        StoreBackend::Sqlite => {
            let mut db_config = DbConfig::new(&config.database_path);
            db_config = if db_config.is_in_memory() {
                DbConfig::in_memory()
            } else {
                db_config.max_connections(config.max_connections)
            };
            let db = Database::new(db_config)
                .await
                .with_context(|| format!("Failed to open database {}", config.database_path))?;
            info!(path = %config.database_path, "Connected to SQLite");
            Arc::new(db)
        }
        StoreBackend::Memory => {
            info!("Using in-memory store, data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    serve(&config, store).await
}
