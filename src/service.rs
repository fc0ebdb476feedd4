//! Reference service: the account, session and bookmark lifecycle.
//!
//! Composes the four stores behind the operations the HTTP layer exposes.
//! Every failure is returned as a [`StoreError`]; nothing is retried or
//! swallowed here.

use crate::domain::{
    Account, AccountId, BookmarkEntry, BookmarkSummary, Paste, PasteId, Session, StoreError,
    StoreResult, Stores,
};
use chrono::Utc;
use tracing::{debug, info};

/// Orchestrates the content, account, session and bookmark stores.
///
/// Built once at startup from an explicit [`Stores`] set and shared between
/// request tasks behind an `Arc`.
pub struct ReferenceService {
    stores: Stores,
}

impl ReferenceService {
    // ---
    pub fn new(stores: Stores) -> Self {
        // ---
        Self { stores }
    }

    // ------------------------------------------------------------------
    // Accounts and sessions
    // ------------------------------------------------------------------

    /// Create an account and open its first session.
    ///
    /// # Errors
    /// `Validation` for a malformed email or empty password, `DuplicateEmail`
    /// if the email is already registered.
    #[tracing::instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> StoreResult<Session> {
        // ---
        let account = Account::create(email, password)?;
        self.stores.accounts.insert(account.clone()).await?;

        let session = self.stores.sessions.issue(&account).await?;
        info!(account_id = %account.id, "Registered account");

        Ok(session)
    }

    /// Verify credentials and open a new session. Earlier sessions stay valid.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> StoreResult<Session> {
        // ---
        let account = self.stores.accounts.authenticate(email, password).await?;

        let session = self.stores.sessions.issue(&account).await?;
        info!(account_id = %account.id, "Issued session");

        Ok(session)
    }

    /// Resolve a token to the full account it was issued for.
    pub async fn resolve(&self, token: &str) -> StoreResult<Account> {
        // ---
        let account_id = self.stores.sessions.resolve(token).await?;
        self.stores
            .accounts
            .get(account_id)
            .await?
            .ok_or(StoreError::InvalidSession)
    }

    async fn account_id(&self, token: &str) -> StoreResult<AccountId> {
        // ---
        self.stores.sessions.resolve(token).await
    }

    // ------------------------------------------------------------------
    // Pastes
    // ------------------------------------------------------------------

    /// Store content without an owner. The returned id is the only handle.
    pub async fn create_paste(&self, content: Vec<u8>) -> StoreResult<PasteId> {
        // ---
        let id = self.stores.content.insert(content).await?;
        debug!(paste_id = %id, "Created anonymous paste");
        Ok(id)
    }

    pub async fn get_paste(&self, id: &PasteId) -> StoreResult<Paste> {
        // ---
        self.stores.content.get(id).await
    }

    // ------------------------------------------------------------------
    // Bookmarks
    // ------------------------------------------------------------------

    /// Store `content` as a new paste and make it the current version of `name`.
    #[tracing::instrument(skip(self, token, content))]
    pub async fn save_bookmark(
        &self,
        token: &str,
        name: &str,
        content: Vec<u8>,
    ) -> StoreResult<PasteId> {
        // ---
        let account_id = self.account_id(token).await?;
        let paste_id = self.stores.content.insert(content).await?;

        self.stores
            .bookmarks
            .append(account_id, name, &paste_id, Utc::now())
            .await?;
        debug!(%account_id, %paste_id, "Saved bookmark version");

        Ok(paste_id)
    }

    /// Make an existing paste the current version of `name`.
    ///
    /// # Errors
    /// `NotFound` if `paste_id` does not exist.
    #[tracing::instrument(skip(self, token))]
    pub async fn bind_bookmark(&self, token: &str, name: &str, paste_id: &PasteId) -> StoreResult<()> {
        // ---
        let account_id = self.account_id(token).await?;
        self.stores.content.get(paste_id).await?;

        self.stores
            .bookmarks
            .append(account_id, name, paste_id, Utc::now())
            .await
    }

    /// Forget every version of `name`. Deleting an unknown name succeeds.
    #[tracing::instrument(skip(self, token))]
    pub async fn delete_bookmark(&self, token: &str, name: &str) -> StoreResult<()> {
        // ---
        let account_id = self.account_id(token).await?;
        self.stores.bookmarks.remove(account_id, name).await
    }

    /// Content of the current version, or `None` if the name has no versions.
    pub async fn fetch_current(&self, token: &str, name: &str) -> StoreResult<Option<Paste>> {
        // ---
        let account_id = self.account_id(token).await?;

        match self.stores.bookmarks.current(account_id, name).await? {
            Some(entry) => self.stores.content.get(&entry.paste_id).await.map(Some),
            None => Ok(None),
        }
    }

    /// Every version of `name`, oldest first.
    pub async fn fetch_history(&self, token: &str, name: &str) -> StoreResult<Vec<BookmarkEntry>> {
        // ---
        let account_id = self.account_id(token).await?;
        self.stores.bookmarks.history(account_id, name).await
    }

    /// One row per bookmark name with its latest version.
    pub async fn list_bookmarks(&self, token: &str) -> StoreResult<Vec<BookmarkSummary>> {
        // ---
        let account_id = self.account_id(token).await?;
        self.stores.bookmarks.list_names(account_id).await
    }
}
