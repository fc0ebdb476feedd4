// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use handlers::*;

// Public exports (visible outside this module)
pub mod domain;
pub mod service;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;

// Hoist up only the public symbol(s)
pub use config::*;
pub use service::ReferenceService;

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    connect_with_retry, // ---
    create_memory_stores,
    create_noop_metrics,
    create_postgres_stores,
    create_prom_metrics,
    InMemoryAccountStore,
    InMemoryBookmarkStore,
    InMemoryContentStore,
    InMemorySessionStore,
    PostgresStore,
};

/// Build the stores selected by the storage configuration.
///
/// # Errors
/// Fails if the database cannot be reached or migrated.
pub async fn create_stores(storage: &StorageConfig) -> Result<domain::Stores> {
    // ---
    match storage {
        StorageConfig::Memory => Ok(create_memory_stores()),
        StorageConfig::Postgres(database) => {
            let pool = connect_with_retry(database).await?;
            Ok(create_postgres_stores(pool))
        }
    }
}

/// Build the HTTP router with stores and metrics determined by `config`.
pub async fn create_router(config: &AppConfig) -> Result<Router> {
    // ---
    tracing_subscriber::fmt::try_init().ok(); // Ignores if already initialized

    let metrics = match config.metrics {
        MetricsKind::Prometheus => create_prom_metrics()?,
        MetricsKind::Noop => create_noop_metrics()?,
    };

    let stores = create_stores(&config.storage).await?;
    let service = Arc::new(ReferenceService::new(stores));

    let app_state = AppState::new(service, metrics, &config.server.public_url);

    let router = Router::new()
        .route("/", get(root_handler).post(create_paste))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/accounts", post(register))
        .route("/token", post(login))
        .route("/bookmarks", get(list_bookmarks))
        .route(
            "/bookmarks/{name}",
            get(get_bookmark).put(save_bookmark).delete(delete_bookmark),
        )
        .route("/bookmarks/{name}/history", get(bookmark_history))
        .route("/bookmarks/{name}/{paste}", put(bind_bookmark))
        .route("/{paste}", get(get_paste))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            track_http_requests,
        ))
        .layer(DefaultBodyLimit::max(config.server.max_paste_bytes))
        .with_state(app_state);

    Ok(router)
}
