use super::poisoned;
use crate::domain::{Account, AccountId, Session, SessionStore, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// Sessions keyed by token. Resolution is a single hash lookup.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    // ---
    async fn issue(&self, account: &Account) -> StoreResult<Session> {
        // ---
        let mut sessions = self.sessions.write().map_err(poisoned)?;

        let mut session = Session::new(account.id);
        while sessions.contains_key(&session.token) {
            session = Session::new(account.id);
        }
        sessions.insert(session.token.clone(), session.clone());

        Ok(session)
    }

    async fn resolve(&self, token: &str) -> StoreResult<AccountId> {
        // ---
        if !Session::is_well_formed(token) {
            return Err(StoreError::InvalidSession);
        }

        let sessions = self.sessions.read().map_err(poisoned)?;
        sessions
            .get(token)
            .map(|session| session.account_id)
            .ok_or(StoreError::InvalidSession)
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn account() -> Account {
        Account::create("alice@example.com", "pw1").unwrap()
    }

    #[tokio::test]
    async fn issued_token_resolves_to_account() {
        // ---
        let store = InMemorySessionStore::new();
        let account = account();

        let session = store.issue(&account).await.unwrap();

        assert_eq!(store.resolve(&session.token).await.unwrap(), account.id);
    }

    #[tokio::test]
    async fn every_issue_is_a_new_session() {
        // ---
        let store = InMemorySessionStore::new();
        let account = account();

        let first = store.issue(&account).await.unwrap();
        let second = store.issue(&account).await.unwrap();

        assert_ne!(first.token, second.token);
        assert_eq!(store.resolve(&first.token).await.unwrap(), account.id);
        assert_eq!(store.resolve(&second.token).await.unwrap(), account.id);
    }

    #[tokio::test]
    async fn unknown_and_malformed_tokens_are_invalid() {
        // ---
        let store = InMemorySessionStore::new();

        for token in ["", "garbage", &"a".repeat(64)] {
            assert_eq!(
                store.resolve(token).await.unwrap_err(),
                StoreError::InvalidSession
            );
        }
    }
}
