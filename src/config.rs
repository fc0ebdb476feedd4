// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the service.
//! Configuration is validated eagerly and failures are treated as
//! deployment errors rather than recoverable runtime conditions.

use anyhow::Result;
use std::time::Duration;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// Fails fast with a clear message if the variable is missing. Missing
/// configuration is a deployment error, not a recoverable runtime condition.
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: server::ServerConfig,
    pub storage: storage::StorageConfig,
    pub metrics: metrics::MetricsKind,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or invalid.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            server: server::ServerConfig::from_env()?,
            storage: storage::StorageConfig::from_env()?,
            metrics: metrics::MetricsKind::from_env()?,
        })
    }

    /// Ephemeral configuration: in-memory stores, no-op metrics, defaults
    /// for everything else. Used by tests and local experiments.
    pub fn in_memory() -> Self {
        // ---
        Self {
            server: server::ServerConfig::default(),
            storage: storage::StorageConfig::Memory,
            metrics: metrics::MetricsKind::Noop,
        }
    }
}

// ============================================================
// Server configuration
// ============================================================

mod server {
    // ---
    use super::*;

    const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
    const DEFAULT_MAX_PASTE_BYTES: usize = 1024 * 1024;

    /// HTTP listener and response-shaping settings.
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        /// Socket address the listener binds to. Defaults to `127.0.0.1:8080`.
        pub bind_addr: String,

        /// Base URL prepended to paste ids in responses, without trailing slash.
        pub public_url: String,

        /// Largest accepted request body in bytes. Defaults to 1 MiB.
        pub max_paste_bytes: usize,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                bind_addr: DEFAULT_BIND_ADDR.to_string(),
                public_url: format!("http://{DEFAULT_BIND_ADDR}"),
                max_paste_bytes: DEFAULT_MAX_PASTE_BYTES,
            }
        }
    }

    impl ServerConfig {
        /// Builds a [`ServerConfig`] from environment variables; all optional.
        pub fn from_env() -> Result<Self> {
            // ---
            let bind_addr = std::env::var("PASTEBOOK_BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

            let public_url = std::env::var("PASTEBOOK_PUBLIC_URL")
                .unwrap_or_else(|_| format!("http://{bind_addr}"))
                .trim_end_matches('/')
                .to_string();

            let max_paste_bytes =
                optional_env_parse!("PASTEBOOK_MAX_PASTE_BYTES", usize, DEFAULT_MAX_PASTE_BYTES);

            Ok(Self {
                bind_addr,
                public_url,
                max_paste_bytes,
            })
        }
    }
}
pub use server::ServerConfig;

// ============================================================
// Storage configuration
// ============================================================

mod storage {
    // ---
    use super::*;

    /// Which backing medium the stores use.
    #[derive(Debug, Clone)]
    pub enum StorageConfig {
        /// Process-local stores; everything is lost on exit.
        Memory,

        /// PostgreSQL through a pooled connection.
        Postgres(DatabaseConfig),
    }

    impl StorageConfig {
        /// Reads `PASTEBOOK_STORAGE` (`memory` by default, or `postgres`).
        ///
        /// # Errors
        /// Unknown backends, or `postgres` without `DATABASE_URL`.
        pub fn from_env() -> Result<Self> {
            // ---
            let backend =
                std::env::var("PASTEBOOK_STORAGE").unwrap_or_else(|_| "memory".to_string());

            match backend.as_str() {
                "memory" => Ok(Self::Memory),
                "postgres" => Ok(Self::Postgres(DatabaseConfig::from_env()?)),
                other => anyhow::bail!("Unknown PASTEBOOK_STORAGE backend: {other}"),
            }
        }
    }

    /// Database-related configuration derived from environment variables.
    #[derive(Debug, Clone)]
    pub struct DatabaseConfig {
        /// PostgreSQL connection string.
        pub database_url: String,

        /// Number of connection attempts before giving up. Defaults to 50.
        pub retry_count: u32,

        /// Maximum time to wait when acquiring a connection from the pool. Defaults to 30 seconds.
        pub acquire_timeout: Duration,

        /// Minimum number of connections to keep in the pool, even when idle. Defaults to 2.
        pub min_connections: u32,

        /// Maximum number of connections open concurrently. Defaults to 15.
        pub max_connections: u32,
    }

    impl DatabaseConfig {
        /// Builds a [`DatabaseConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `DATABASE_URL` is missing.
        pub fn from_env() -> Result<Self> {
            // ---
            let database_url = required_env!("DATABASE_URL");
            let retry_count = optional_env_parse!("PASTEBOOK_DB_RETRY_COUNT", u32, 50);
            let acquire_timeout_secs =
                optional_env_parse!("PASTEBOOK_DB_ACQUIRE_TIMEOUT_SEC", u64, 30);
            let min_connections = optional_env_parse!("PASTEBOOK_DB_MIN_CONNECTIONS", u32, 2);
            let max_connections = optional_env_parse!("PASTEBOOK_DB_MAX_CONNECTIONS", u32, 15);

            Ok(Self {
                database_url,
                retry_count,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
                min_connections,
                max_connections,
            })
        }
    }
}
pub use storage::{DatabaseConfig, StorageConfig};

// ============================================================
// Metrics configuration
// ============================================================

mod metrics {
    // ---
    use super::*;

    /// Metrics backend selected by `PASTEBOOK_METRICS_TYPE`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MetricsKind {
        Noop,
        Prometheus,
    }

    impl MetricsKind {
        /// # Errors
        /// Returns an error for values other than `noop` and `prom`.
        pub fn from_env() -> Result<Self> {
            // ---
            let kind =
                std::env::var("PASTEBOOK_METRICS_TYPE").unwrap_or_else(|_| "noop".to_string());

            match kind.as_str() {
                "noop" => Ok(Self::Noop),
                "prom" => Ok(Self::Prometheus),
                other => anyhow::bail!("Unknown PASTEBOOK_METRICS_TYPE: {other}"),
            }
        }
    }
}
pub use metrics::MetricsKind;

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use anyhow::Result;
    use serial_test::serial;

    fn clear_env() {
        // ---
        for key in [
            "PASTEBOOK_BIND_ADDR",
            "PASTEBOOK_PUBLIC_URL",
            "PASTEBOOK_MAX_PASTE_BYTES",
            "PASTEBOOK_STORAGE",
            "PASTEBOOK_METRICS_TYPE",
            "DATABASE_URL",
            "PASTEBOOK_DB_RETRY_COUNT",
            "PASTEBOOK_DB_ACQUIRE_TIMEOUT_SEC",
            "PASTEBOOK_DB_MIN_CONNECTIONS",
            "PASTEBOOK_DB_MAX_CONNECTIONS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn defaults_need_no_environment() -> Result<()> {
        // ---
        clear_env();

        let cfg = AppConfig::from_env()?;
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.server.public_url, "http://127.0.0.1:8080");
        assert_eq!(cfg.server.max_paste_bytes, 1024 * 1024);
        assert!(matches!(cfg.storage, StorageConfig::Memory));
        assert_eq!(cfg.metrics, MetricsKind::Noop);

        Ok(())
    }

    #[test]
    #[serial]
    fn public_url_drops_trailing_slash() -> Result<()> {
        // ---
        clear_env();
        std::env::set_var("PASTEBOOK_PUBLIC_URL", "https://paste.example.com/");

        let cfg = ServerConfig::from_env()?;
        assert_eq!(cfg.public_url, "https://paste.example.com");

        clear_env();
        Ok(())
    }

    #[test]
    #[serial]
    fn postgres_requires_database_url() -> Result<()> {
        // ---
        clear_env();
        std::env::set_var("PASTEBOOK_STORAGE", "postgres");

        assert_missing_config!(StorageConfig::from_env(), "DATABASE_URL");

        clear_env();
        Ok(())
    }

    #[test]
    #[serial]
    fn database_defaults_applied() -> Result<()> {
        // ---
        clear_env();
        let db_url = "postgres://test";
        std::env::set_var("DATABASE_URL", db_url);

        let cfg = DatabaseConfig::from_env()?;
        assert_eq!(cfg.database_url, db_url);
        assert_eq!(cfg.retry_count, 50);
        assert_eq!(cfg.acquire_timeout.as_secs(), 30);
        assert_eq!(cfg.min_connections, 2);
        assert_eq!(cfg.max_connections, 15);

        clear_env();
        Ok(())
    }

    #[test]
    #[serial]
    fn database_overrides_defaults() -> Result<()> {
        // ---
        clear_env();
        std::env::set_var("PASTEBOOK_STORAGE", "postgres");
        std::env::set_var("DATABASE_URL", "postgres://test");
        std::env::set_var("PASTEBOOK_DB_RETRY_COUNT", "3");
        std::env::set_var("PASTEBOOK_DB_ACQUIRE_TIMEOUT_SEC", "5");
        std::env::set_var("PASTEBOOK_DB_MIN_CONNECTIONS", "10");
        std::env::set_var("PASTEBOOK_DB_MAX_CONNECTIONS", "1000");

        let StorageConfig::Postgres(cfg) = StorageConfig::from_env()? else {
            panic!("expected postgres storage");
        };
        assert_eq!(cfg.retry_count, 3);
        assert_eq!(cfg.acquire_timeout.as_secs(), 5);
        assert_eq!(cfg.min_connections, 10);
        assert_eq!(cfg.max_connections, 1000);

        clear_env();
        Ok(())
    }

    #[test]
    #[serial]
    fn unknown_backends_are_rejected() {
        // ---
        clear_env();

        std::env::set_var("PASTEBOOK_STORAGE", "sqlite");
        assert!(StorageConfig::from_env().is_err());

        std::env::set_var("PASTEBOOK_METRICS_TYPE", "statsd");
        assert!(MetricsKind::from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn prometheus_metrics_selected() -> Result<()> {
        // ---
        clear_env();
        std::env::set_var("PASTEBOOK_METRICS_TYPE", "prom");

        assert_eq!(MetricsKind::from_env()?, MetricsKind::Prometheus);

        clear_env();
        Ok(())
    }
}
