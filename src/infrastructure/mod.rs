mod database;
mod memory;
pub mod metrics;

// Re-export the factory functions for easy access
pub use database::{connect_with_retry, create as create_postgres_stores, PostgresStore};
pub use memory::{
    create as create_memory_stores, InMemoryAccountStore, InMemoryBookmarkStore,
    InMemoryContentStore, InMemorySessionStore,
};
pub use metrics::{create_noop_metrics, create_prom_metrics};
