use thiserror::Error;

/// Typed failures surfaced by every store and by the reference service.
///
/// `InvalidCredentials` deliberately covers both "unknown email" and
/// "wrong password" so callers cannot enumerate registered accounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    // ---
    /// Malformed input (bad email, empty password, unparsable payload).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An account with this email already exists.
    #[error("email already in use")]
    DuplicateEmail,

    /// Email unknown or password mismatch.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Session token absent, malformed or unknown.
    #[error("invalid session")]
    InvalidSession,

    /// No paste exists for the requested identifier.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backing medium failed; never retried by the core.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Convenience alias used throughout the store layer.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
