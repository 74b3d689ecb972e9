use gloo_storage::{LocalStorage, Storage};

use super::KeyValueStore;
use crate::error::StorageError;

/// Browser `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}
