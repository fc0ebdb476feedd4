use super::poisoned;
use crate::domain::{Account, AccountId, AccountStore, StoreError, StoreResult};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct Accounts {
    by_email: HashMap<String, Account>,
    email_by_id: HashMap<AccountId, String>,
}

/// Accounts keyed by email, with a secondary id index.
///
/// Both maps live under one lock so the uniqueness check and the insert are a
/// single critical section.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<Accounts>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryAccountStore {
    // ---
    async fn insert(&self, account: Account) -> StoreResult<()> {
        // ---
        let mut guard = self.accounts.write().map_err(poisoned)?;
        let accounts = &mut *guard;

        match accounts.by_email.entry(account.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateEmail),
            Entry::Vacant(slot) => {
                let id = account.id;
                let email = account.email.clone();
                slot.insert(account);
                accounts.email_by_id.insert(id, email);
                Ok(())
            }
        }
    }

    async fn authenticate(&self, email: &str, password: &str) -> StoreResult<Account> {
        // ---
        let account = {
            let accounts = self.accounts.read().map_err(poisoned)?;
            accounts.by_email.get(email).cloned()
        };

        // Hash verification runs outside the lock.
        match account {
            Some(account) if account.verify_password(password) => Ok(account),
            _ => Err(StoreError::InvalidCredentials),
        }
    }

    async fn get(&self, id: AccountId) -> StoreResult<Option<Account>> {
        // ---
        let accounts = self.accounts.read().map_err(poisoned)?;
        Ok(accounts
            .email_by_id
            .get(&id)
            .and_then(|email| accounts.by_email.get(email))
            .cloned())
    }
}
