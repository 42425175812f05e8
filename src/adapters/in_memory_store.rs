//! In-memory table store for testing.
//!
//! Tables are encoded the same way as on disk, so round trips through this
//! store exercise the serialization format without touching the file system.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    Result,
    error::Error,
    ports::{CacheKey, CacheStore, TableKey, TableStore},
    q_learning::SavedTable,
    search::MoveCache,
};

/// Stores encoded tables and move caches in shared maps; clones share the
/// same storage.
///
/// # Examples
///
/// ```
/// use boardgames::adapters::InMemoryStore;
/// use boardgames::board::{GridBoard, Seat};
/// use boardgames::ports::{TableKey, TableStore};
///
/// let store = InMemoryStore::new();
/// let key = TableKey::new(&GridBoard::tic_tac_toe(), Seat::First);
/// assert!(store.load(&key)?.is_none());
/// # Ok::<(), boardgames::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    caches: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tables currently stored
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    pub fn contains(&self, key: &TableKey) -> bool {
        self.storage().contains_key(&key.to_string())
    }

    pub fn clear(&self) {
        self.storage().clear();
        self.caches().clear();
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn caches(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.caches.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TableStore for InMemoryStore {
    fn load(&self, key: &TableKey) -> Result<Option<SavedTable>> {
        let storage = self.storage();
        let Some(bytes) = storage.get(&key.to_string()) else {
            return Ok(None);
        };
        let table = rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: format!("decode table {key} from memory"),
            message: e.to_string(),
        })?;
        Ok(Some(table))
    }

    fn save(&self, key: &TableKey, table: &SavedTable) -> Result<()> {
        let bytes = rmp_serde::to_vec(table).map_err(|e| Error::SerializationContext {
            operation: format!("encode table {key} for memory"),
            message: e.to_string(),
        })?;
        self.storage().insert(key.to_string(), bytes);
        Ok(())
    }
}

impl CacheStore for InMemoryStore {
    fn load_cache(&self, key: &CacheKey) -> Result<Option<MoveCache>> {
        let caches = self.caches();
        let Some(bytes) = caches.get(&key.to_string()) else {
            return Ok(None);
        };
        let cache = rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: format!("decode move cache {key} from memory"),
            message: e.to_string(),
        })?;
        Ok(Some(cache))
    }

    fn save_cache(&self, key: &CacheKey, cache: &MoveCache) -> Result<()> {
        let bytes = rmp_serde::to_vec(cache).map_err(|e| Error::SerializationContext {
            operation: format!("encode move cache {key} for memory"),
            message: e.to_string(),
        })?;
        self.caches().insert(key.to_string(), bytes);
        Ok(())
    }
}
