// src/repositories/collection_repository.rs
//
// Maps collections to JSON blobs under their storage keys.
// Session-only collections have no key and are never read or written.

use std::sync::Arc;

use crate::domain::collection::{CollectionEntry, CollectionKind};
use crate::error::{AppError, AppResult};
use crate::repositories::storage_repository::KeyValueStorage;

pub trait CollectionRepository: Send + Sync {
    /// `Ok(None)` when nothing is stored under the history key
    fn load_history(&self) -> AppResult<Option<Vec<String>>>;
    fn save_history(&self, history: &[String]) -> AppResult<()>;

    /// `Ok(None)` when nothing is stored for `kind`
    fn load_entries(&self, kind: CollectionKind) -> AppResult<Option<Vec<CollectionEntry>>>;
    fn save_entries(&self, kind: CollectionKind, entries: &[CollectionEntry]) -> AppResult<()>;
}

pub struct StorageCollectionRepository {
    storage: Arc<dyn KeyValueStorage>,
}

impl StorageCollectionRepository {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    fn key_for(kind: CollectionKind) -> AppResult<&'static str> {
        kind.storage_key().ok_or_else(|| {
            AppError::Other(format!("The {} collection is session-only", kind))
        })
    }
}

impl CollectionRepository for StorageCollectionRepository {
    fn load_history(&self) -> AppResult<Option<Vec<String>>> {
        let key = Self::key_for(CollectionKind::History)?;

        match self.storage.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save_history(&self, history: &[String]) -> AppResult<()> {
        let key = Self::key_for(CollectionKind::History)?;
        let json = serde_json::to_string(history)?;
        self.storage.set_item(key, &json)
    }

    fn load_entries(&self, kind: CollectionKind) -> AppResult<Option<Vec<CollectionEntry>>> {
        let key = Self::key_for(kind)?;

        match self.storage.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save_entries(&self, kind: CollectionKind, entries: &[CollectionEntry]) -> AppResult<()> {
        let key = Self::key_for(kind)?;
        let json = serde_json::to_string(entries)?;
        self.storage.set_item(key, &json)
    }
}
