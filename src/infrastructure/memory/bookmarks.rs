use super::poisoned;
use crate::domain::{
    AccountId, BookmarkEntry, BookmarkStore, BookmarkSummary, PasteId, StoreResult,
};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

/// Versioned bookmark log: an arena of entries plus an index by key.
///
/// The per-key slot list is the version history. Its order is the order in
/// which appends took the write lock, which is the commit order.
#[derive(Debug, Default)]
struct BookmarkLog {
    /// Every live version. Removed versions leave a `None` until reused.
    arena: Vec<Option<BookmarkEntry>>,

    /// Vacated arena slots.
    free: Vec<usize>,

    /// account -> name -> arena slots, oldest first.
    index: HashMap<AccountId, BTreeMap<String, Vec<usize>>>,
}

impl BookmarkLog {
    // ---
    fn store(&mut self, entry: BookmarkEntry) -> usize {
        // ---
        match self.free.pop() {
            Some(slot) => {
                self.arena[slot] = Some(entry);
                slot
            }
            None => {
                self.arena.push(Some(entry));
                self.arena.len() - 1
            }
        }
    }

    fn slots(&self, account: AccountId, name: &str) -> &[usize] {
        // ---
        self.index
            .get(&account)
            .and_then(|names| names.get(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn entry(&self, slot: usize) -> Option<&BookmarkEntry> {
        // ---
        self.arena.get(slot).and_then(Option::as_ref)
    }
}

/// In-memory [`BookmarkStore`].
#[derive(Debug, Default)]
pub struct InMemoryBookmarkStore {
    log: RwLock<BookmarkLog>,
}

impl InMemoryBookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl BookmarkStore for InMemoryBookmarkStore {
    // ---
    async fn append(
        &self,
        account: AccountId,
        name: &str,
        paste_id: &PasteId,
        now: DateTime<Utc>,
    ) -> StoreResult<()> {
        // ---
        let mut log = self.log.write().map_err(poisoned)?;

        let slot = log.store(BookmarkEntry {
            account_id: account,
            name: name.to_string(),
            paste_id: paste_id.clone(),
            created_at: now,
        });

        log.index
            .entry(account)
            .or_default()
            .entry(name.to_string())
            .or_default()
            .push(slot);

        Ok(())
    }

    async fn remove(&self, account: AccountId, name: &str) -> StoreResult<()> {
        // ---
        let mut guard = self.log.write().map_err(poisoned)?;
        let log = &mut *guard;

        let Some(names) = log.index.get_mut(&account) else {
            return Ok(());
        };

        if let Some(slots) = names.remove(name) {
            for slot in slots {
                log.arena[slot] = None;
                log.free.push(slot);
            }
        }

        if names.is_empty() {
            log.index.remove(&account);
        }

        Ok(())
    }

    async fn current(&self, account: AccountId, name: &str) -> StoreResult<Option<BookmarkEntry>> {
        // ---
        let log = self.log.read().map_err(poisoned)?;
        Ok(log
            .slots(account, name)
            .last()
            .and_then(|&slot| log.entry(slot))
            .cloned())
    }

    async fn history(&self, account: AccountId, name: &str) -> StoreResult<Vec<BookmarkEntry>> {
        // ---
        let log = self.log.read().map_err(poisoned)?;
        Ok(log
            .slots(account, name)
            .iter()
            .filter_map(|&slot| log.entry(slot))
            .cloned()
            .collect())
    }

    async fn list_names(&self, account: AccountId) -> StoreResult<Vec<BookmarkSummary>> {
        // ---
        let log = self.log.read().map_err(poisoned)?;
        let Some(names) = log.index.get(&account) else {
            return Ok(Vec::new());
        };

        Ok(names
            .values()
            .filter_map(|slots| slots.last())
            .filter_map(|&slot| log.entry(slot))
            .cloned()
            .map(BookmarkSummary::from)
            .collect())
    }
}
