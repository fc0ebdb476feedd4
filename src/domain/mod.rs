mod credential;
mod error;
mod metrics;
mod models;
mod stores;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Publicly expose the store abstractions and their data model
pub use error::{StoreError, StoreResult};
pub use models::{Account, AccountId, BookmarkEntry, BookmarkSummary, Paste, PasteId, Session};
pub use stores::{
    AccountStore, AccountStorePtr, BookmarkStore, BookmarkStorePtr, ContentStore, ContentStorePtr,
    SessionStore, SessionStorePtr, Stores,
};
