//! In-memory blob store
//!
//! Backs tests and any caller that wants the full ledger API without touching
//! the filesystem.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{GiftbookError, GiftbookResult};

use super::BlobStore;

/// Blob store keeping everything in a process-local map
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> GiftbookResult<Option<String>> {
        let data = self
            .data
            .read()
            .map_err(|e| GiftbookError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> GiftbookResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| GiftbookError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> GiftbookResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| GiftbookError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.remove(key);
        Ok(())
    }
}
