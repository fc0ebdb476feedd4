//! Email validation and password hashing for account credentials.
//!
//! Passwords are hashed with Argon2id using a fresh random salt and stored
//! in PHC string format, so the salt and parameters travel with the hash.

use super::error::{StoreError, StoreResult};
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    // ---
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// Rejects emails that are not of the shape `local@domain.tld`.
pub fn validate_email(email: &str) -> StoreResult<()> {
    // ---
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(StoreError::Validation(format!("malformed email: {email:?}")))
    }
}

/// Minimum password policy: non-empty.
pub fn validate_password(password: &str) -> StoreResult<()> {
    // ---
    if password.is_empty() {
        return Err(StoreError::Validation("password must not be empty".to_string()));
    }
    Ok(())
}

/// Hash a plaintext password into a PHC-formatted Argon2id string.
pub fn hash_password(password: &str) -> StoreResult<String> {
    // ---
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::Storage(format!("credential hashing failed: {e}")))
}

/// Recompute and compare. A stored hash that does not parse never verifies.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    // ---
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        tracing::error!("Stored credential is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
