use super::poisoned;
use crate::domain::{ContentStore, Paste, PasteId, StoreError, StoreResult};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

/// Paste blobs in a `HashMap`, write-once.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    pastes: RwLock<HashMap<PasteId, Paste>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ContentStore for InMemoryContentStore {
    // ---
    async fn insert(&self, content: Vec<u8>) -> StoreResult<PasteId> {
        // ---
        let mut pastes = self.pastes.write().map_err(poisoned)?;
        let mut paste = Paste::new(content);

        // Redraw until the id is vacant; existing pastes are never replaced.
        loop {
            match pastes.entry(paste.id.clone()) {
                Entry::Occupied(_) => paste.id = PasteId::generate(),
                Entry::Vacant(slot) => {
                    let id = paste.id.clone();
                    slot.insert(paste);
                    return Ok(id);
                }
            }
        }
    }

    async fn get(&self, id: &PasteId) -> StoreResult<Paste> {
        // ---
        let pastes = self.pastes.read().map_err(poisoned)?;
        pastes
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
