//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reaction_common::{AppConfig, AppError, StorageBackend};
use reaction_db::{
    create_pool, run_migrations, MemoryReactionStore, PgPostDirectory, PgReactionStore,
    PgUserDirectory, PoolConfig,
};
use reaction_service::{ServiceContext, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes are merged after the middleware stack so probes are
/// never rate limited.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    router.merge(health_routes()).with_state(state)
}

/// Initialize the configured backend and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory reaction store");
            memory_app_state(MemoryReactionStore::new(), config)
        }
        StorageBackend::Postgres => postgres_app_state(config).await,
    }
}

/// AppState over an existing in-memory store
pub fn memory_app_state(store: MemoryReactionStore, config: AppConfig) -> Result<AppState, AppError> {
    let store = Arc::new(store);

    let service_context = ServiceContextBuilder::new()
        .reaction_store(store.clone())
        .reaction_reader(store.clone())
        .post_directory(store.clone())
        .user_directory(store)
        .config(config.reactions.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

async fn postgres_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let db = config
        .database
        .as_ref()
        .ok_or_else(|| AppError::Config("database configuration is required for the postgres backend".to_string()))?;

    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::primary(db))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if db.run_migrations {
        info!(dir = %db.migrations_dir, "Running database migrations");
        run_migrations(&pool, &db.migrations_dir)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let mut store = PgReactionStore::new(pool.clone());
    if let Some(replica) = PoolConfig::replica(db) {
        info!("Connecting to read replica...");
        let read_pool = create_pool(&replica)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        store = store.with_read_pool(read_pool);
        info!("Read replica connection established");
    }

    let service_context = postgres_context(store, pool, &config)?;
    Ok(AppState::new(service_context, config))
}

fn postgres_context(
    store: PgReactionStore,
    pool: reaction_db::PgPool,
    config: &AppConfig,
) -> Result<ServiceContext, AppError> {
    let store = Arc::new(store);

    ServiceContextBuilder::new()
        .reaction_store(store.clone())
        .reaction_reader(store)
        .post_directory(Arc::new(PgPostDirectory::new(pool.clone())))
        .user_directory(Arc::new(PgUserDirectory::new(pool)))
        .config(config.reactions.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address {}: {e}", config.api.address())))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
