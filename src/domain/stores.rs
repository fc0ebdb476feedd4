use super::error::StoreResult;
use super::models::{Account, AccountId, BookmarkEntry, BookmarkSummary, Paste, PasteId, Session};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Write-once storage for paste content.
#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    // ---
    /// Persist `content` under a freshly generated, collision-free id.
    async fn insert(&self, content: Vec<u8>) -> StoreResult<PasteId>;

    /// Fetch a paste; `NotFound` if no blob exists for `id`.
    async fn get(&self, id: &PasteId) -> StoreResult<Paste>;
}

/// Registered accounts keyed by email.
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    // ---
    /// Atomic check-and-insert; `DuplicateEmail` if the email is taken.
    async fn insert(&self, account: Account) -> StoreResult<()>;

    /// `InvalidCredentials` for an unknown email or a wrong password alike.
    async fn authenticate(&self, email: &str, password: &str) -> StoreResult<Account>;

    /// Look up an account by id.
    async fn get(&self, id: AccountId) -> StoreResult<Option<Account>>;
}

/// Opaque session tokens mapping to accounts.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    // ---
    /// Mint and persist a new session. Earlier sessions stay valid.
    async fn issue(&self, account: &Account) -> StoreResult<Session>;

    /// `InvalidSession` if the token is absent, malformed or unknown.
    async fn resolve(&self, token: &str) -> StoreResult<AccountId>;
}

/// Versioned named references: `(account, name)` to an append-only log of pastes.
#[async_trait::async_trait]
pub trait BookmarkStore: Send + Sync {
    // ---
    /// Add a version to the tail of the `(account, name)` log.
    async fn append(
        &self,
        account: AccountId,
        name: &str,
        paste_id: &PasteId,
        now: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Drop every version for the key. Removing a missing key is a no-op.
    async fn remove(&self, account: AccountId, name: &str) -> StoreResult<()>;

    /// Latest version, or `None` if the key has no entries.
    async fn current(&self, account: AccountId, name: &str) -> StoreResult<Option<BookmarkEntry>>;

    /// All versions, oldest first.
    async fn history(&self, account: AccountId, name: &str) -> StoreResult<Vec<BookmarkEntry>>;

    /// One row per name owned by `account`, latest version only, sorted by name.
    async fn list_names(&self, account: AccountId) -> StoreResult<Vec<BookmarkSummary>>;
}

/// Type aliases for any backend implementing the store traits.
pub type ContentStorePtr = Arc<dyn ContentStore>;
pub type AccountStorePtr = Arc<dyn AccountStore>;
pub type SessionStorePtr = Arc<dyn SessionStore>;
pub type BookmarkStorePtr = Arc<dyn BookmarkStore>;

/// The full set of stores the reference service is built from.
#[derive(Clone)]
pub struct Stores {
    // ---
    pub content: ContentStorePtr,
    pub accounts: AccountStorePtr,
    pub sessions: SessionStorePtr,
    pub bookmarks: BookmarkStorePtr,
}
