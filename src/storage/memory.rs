use std::cell::RefCell;
use std::collections::BTreeMap;

use super::KeyValueStorage;
use crate::types::errors::StorageError;

/// Process-local storage. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a key, mostly for tests that start from an existing blob.
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self
            .items
            .try_borrow()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self
            .items
            .try_borrow_mut()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self
            .items
            .try_borrow_mut()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let items = self
            .items
            .try_borrow()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(items.keys().cloned().collect())
    }
}
