use super::credential;
use super::error::StoreResult;
use base64::Engine;
use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Accounts are identified by a random UUID assigned at registration.
pub type AccountId = Uuid;

/// Random bytes behind a paste id; 9 bytes encode to 12 URL-safe characters.
const PASTE_ID_BYTES: usize = 9;

/// Random bytes behind a session token; rendered as 64 hex characters.
const SESSION_TOKEN_BYTES: usize = 32;

// ============================================================================
// Paste
// ============================================================================

/// Opaque, URL-safe identifier of a paste.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasteId(String);

impl PasteId {
    // ---
    /// Draw a fresh identifier from the OS random source.
    ///
    /// Uniqueness is ultimately enforced by the content store, which redraws
    /// on the (astronomically unlikely) collision.
    pub fn generate() -> Self {
        // ---
        let mut bytes = [0u8; PASTE_ID_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        // ---
        &self.0
    }
}

impl From<String> for PasteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PasteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PasteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An immutable blob of submitted bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paste {
    // ---
    pub id: PasteId,
    pub content: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl Paste {
    // ---
    pub fn new(content: Vec<u8>) -> Self {
        // ---
        Self {
            id: PasteId::generate(),
            content,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Account
// ============================================================================

/// A registered account. The plaintext password is never held here.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    // ---
    pub id: AccountId,

    /// Unique, compared case-sensitively exactly as submitted.
    pub email: String,

    /// Argon2id PHC string.
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

impl Account {
    // ---
    /// Validate the submitted credentials and derive a new account from them.
    ///
    /// # Errors
    /// `StoreError::Validation` when the email is malformed or the password empty.
    pub fn create(email: &str, password: &str) -> StoreResult<Self> {
        // ---
        credential::validate_email(email)?;
        credential::validate_password(password)?;

        Ok(Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: credential::hash_password(password)?,
            created_at: Utc::now(),
        })
    }

    pub fn verify_password(&self, password: &str) -> bool {
        // ---
        credential::verify_password(password, &self.password_hash)
    }
}

// Keep the credential hash out of logs.
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Session
// ============================================================================

/// Proof that a request acts on behalf of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    // ---
    pub token: String,
    pub account_id: AccountId,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    // ---
    /// Mint a session with a token drawn from the OS random source.
    pub fn new(account_id: AccountId) -> Self {
        // ---
        let mut bytes = [0u8; SESSION_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);

        Self {
            token: hex::encode(bytes),
            account_id,
            issued_at: Utc::now(),
        }
    }

    /// Cheap shape check done before any lookup.
    pub fn is_well_formed(token: &str) -> bool {
        // ---
        token.len() == SESSION_TOKEN_BYTES * 2 && token.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

// ============================================================================
// Bookmarks
// ============================================================================

/// One version of a bookmark: `(account, name)` bound to a paste at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkEntry {
    // ---
    pub account_id: AccountId,
    pub name: String,
    pub paste_id: PasteId,
    pub created_at: DateTime<Utc>,
}

/// Index row for one bookmark name, showing only its latest version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkSummary {
    // ---
    pub name: String,
    pub paste_id: PasteId,
    pub created_at: DateTime<Utc>,
}

impl From<BookmarkEntry> for BookmarkSummary {
    fn from(entry: BookmarkEntry) -> Self {
        Self {
            name: entry.name,
            paste_id: entry.paste_id,
            created_at: entry.created_at,
        }
    }
}
