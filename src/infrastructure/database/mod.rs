mod postgres_store;

pub use postgres_store::{create, PostgresStore};

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Connects to PostgreSQL, retrying while the server comes up, then applies
/// the schema migrations.
///
/// # Errors
/// Returns an error once `retry_count` attempts have failed, or if the
/// migrations cannot be applied.
pub async fn connect_with_retry(config: &DatabaseConfig) -> Result<PgPool> {
    // ---
    let options = PgPoolOptions::new()
        .acquire_timeout(config.acquire_timeout)
        .min_connections(config.min_connections)
        .max_connections(config.max_connections);

    let mut attempt = 0;
    let pool = loop {
        attempt += 1;
        match options.clone().connect(&config.database_url).await {
            Ok(pool) => break pool,
            Err(e) if attempt < config.retry_count => {
                tracing::warn!(attempt, "Database not ready: {}", e);
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            Err(e) => {
                return Err(e).context(format!(
                    "failed to connect to database after {attempt} attempts"
                ))
            }
        }
    };

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    tracing::info!("Database ready after {} attempt(s)", attempt);
    Ok(pool)
}
