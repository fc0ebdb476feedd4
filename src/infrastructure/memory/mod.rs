//! In-memory store backends.
//!
//! Every store keeps its state behind a `std::sync::RwLock`. Locks are never
//! held across an `.await`, so these are safe to share between request tasks.
//! Data is lost when the process exits.

mod accounts;
mod bookmarks;
mod content;
mod sessions;

pub use accounts::InMemoryAccountStore;
pub use bookmarks::InMemoryBookmarkStore;
pub use content::InMemoryContentStore;
pub use sessions::InMemorySessionStore;

use crate::domain::{StoreError, Stores};
use std::sync::Arc;

/// Creates the full set of in-memory stores.
pub fn create() -> Stores {
    // ---
    tracing::info!("Using in-memory storage");

    Stores {
        content: Arc::new(InMemoryContentStore::new()),
        accounts: Arc::new(InMemoryAccountStore::new()),
        sessions: Arc::new(InMemorySessionStore::new()),
        bookmarks: Arc::new(InMemoryBookmarkStore::new()),
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    // ---
    StoreError::Storage(format!("lock poisoned: {e}"))
}
