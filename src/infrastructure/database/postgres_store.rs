use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    Account, AccountId, AccountStore, BookmarkEntry, BookmarkStore, BookmarkSummary, ContentStore,
    Paste, PasteId, Session, SessionStore, StoreError, StoreResult, Stores,
};

/// Attempts at drawing a vacant paste id before giving up.
const MAX_PASTE_ID_ATTEMPTS: usize = 8;

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}

#[derive(sqlx::FromRow)]
struct PasteRow {
    id: String,
    content: Vec<u8>,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct BookmarkRow {
    account_id: Uuid,
    name: String,
    paste_id: String,
    created_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(r: AccountRow) -> Self {
        Account {
            id: r.id,
            email: r.email,
            password_hash: r.password_hash,
            created_at: r.created_at,
        }
    }
}

impl From<BookmarkRow> for BookmarkEntry {
    fn from(r: BookmarkRow) -> Self {
        BookmarkEntry {
            account_id: r.account_id,
            name: r.name,
            paste_id: PasteId::from(r.paste_id),
            created_at: r.created_at,
        }
    }
}

/// Creates the full set of stores backed by one PostgreSQL pool.
pub fn create(pool: PgPool) -> Stores {
    // ---
    tracing::info!("Using PostgreSQL storage");
    let store = Arc::new(PostgresStore::new(pool));

    Stores {
        content: store.clone(),
        accounts: store.clone(),
        sessions: store.clone(),
        bookmarks: store,
    }
}

/// PostgreSQL implementation of every store trait.
///
/// Email uniqueness rests on the `UNIQUE` constraint and bookmark ordering on
/// the `BIGSERIAL` sequence, so neither needs an explicit transaction.
pub struct PostgresStore {
    // ---
    pool: PgPool,
}

impl PostgresStore {
    // ---
    pub fn new(pool: PgPool) -> Self {
        // ---
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ContentStore for PostgresStore {
    // ---
    async fn insert(&self, content: Vec<u8>) -> StoreResult<PasteId> {
        // ---
        for _ in 0..MAX_PASTE_ID_ATTEMPTS {
            let id = PasteId::generate();

            let inserted = sqlx::query(
                "INSERT INTO pastes (id, content, created_at) VALUES ($1, $2, $3)
                 ON CONFLICT (id) DO NOTHING",
            )
            .bind(id.as_str())
            .bind(content.as_slice())
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

            if inserted == 1 {
                return Ok(id);
            }
            tracing::warn!("Paste id collision on {}, redrawing", id);
        }

        Err(StoreError::Storage("could not allocate a unique paste id".to_string()))
    }

    async fn get(&self, id: &PasteId) -> StoreResult<Paste> {
        // ---
        let row = sqlx::query_as::<_, PasteRow>(
            "SELECT id, content, created_at FROM pastes WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| Paste {
            id: PasteId::from(r.id),
            content: r.content,
            created_at: r.created_at,
        })
        .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

#[async_trait::async_trait]
impl AccountStore for PostgresStore {
    // ---
    async fn insert(&self, account: Account) -> StoreResult<()> {
        // ---
        let result = sqlx::query(
            "INSERT INTO accounts (id, email, password_hash, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn authenticate(&self, email: &str, password: &str) -> StoreResult<Account> {
        // ---
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, email, password_hash, created_at FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match row.map(Account::from) {
            Some(account) if account.verify_password(password) => Ok(account),
            _ => Err(StoreError::InvalidCredentials),
        }
    }

    async fn get(&self, id: AccountId) -> StoreResult<Option<Account>> {
        // ---
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, email, password_hash, created_at FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Account::from))
    }
}

#[async_trait::async_trait]
impl SessionStore for PostgresStore {
    // ---
    async fn issue(&self, account: &Account) -> StoreResult<Session> {
        // ---
        let session = Session::new(account.id);

        sqlx::query("INSERT INTO sessions (token, account_id, issued_at) VALUES ($1, $2, $3)")
            .bind(&session.token)
            .bind(session.account_id)
            .bind(session.issued_at)
            .execute(&self.pool)
            .await?;

        Ok(session)
    }

    async fn resolve(&self, token: &str) -> StoreResult<AccountId> {
        // ---
        if !Session::is_well_formed(token) {
            return Err(StoreError::InvalidSession);
        }

        sqlx::query_scalar::<_, Uuid>("SELECT account_id FROM sessions WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::InvalidSession)
    }
}

#[async_trait::async_trait]
impl BookmarkStore for PostgresStore {
    // ---
    async fn append(
        &self,
        account: AccountId,
        name: &str,
        paste_id: &PasteId,
        now: DateTime<Utc>,
    ) -> StoreResult<()> {
        // ---
        sqlx::query(
            "INSERT INTO bookmarks (account_id, name, paste_id, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(account)
        .bind(name)
        .bind(paste_id.as_str())
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, account: AccountId, name: &str) -> StoreResult<()> {
        // ---
        sqlx::query("DELETE FROM bookmarks WHERE account_id = $1 AND name = $2")
            .bind(account)
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn current(&self, account: AccountId, name: &str) -> StoreResult<Option<BookmarkEntry>> {
        // ---
        let row = sqlx::query_as::<_, BookmarkRow>(
            "SELECT account_id, name, paste_id, created_at FROM bookmarks
             WHERE account_id = $1 AND name = $2
             ORDER BY seq DESC LIMIT 1",
        )
        .bind(account)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BookmarkEntry::from))
    }

    async fn history(&self, account: AccountId, name: &str) -> StoreResult<Vec<BookmarkEntry>> {
        // ---
        let rows = sqlx::query_as::<_, BookmarkRow>(
            "SELECT account_id, name, paste_id, created_at FROM bookmarks
             WHERE account_id = $1 AND name = $2
             ORDER BY seq ASC",
        )
        .bind(account)
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BookmarkEntry::from).collect())
    }

    async fn list_names(&self, account: AccountId) -> StoreResult<Vec<BookmarkSummary>> {
        // ---
        let rows = sqlx::query_as::<_, BookmarkRow>(
            "SELECT DISTINCT ON (name) account_id, name, paste_id, created_at FROM bookmarks
             WHERE account_id = $1
             ORDER BY name, seq DESC",
        )
        .bind(account)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| BookmarkSummary::from(BookmarkEntry::from(r)))
            .collect())
    }
}
