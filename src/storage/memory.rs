//! In-memory backing store
//!
//! Clones share the same map, so a test can hand one handle to the store and
//! keep another to inspect what was persisted.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{FinanceError, FinanceResult};

use super::StateStorage;

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StateStorage for MemoryStorage {
    fn get_item(&self, name: &str) -> FinanceResult<Option<String>> {
        let items = self
            .items
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(items.get(name).cloned())
    }

    fn set_item(&self, name: &str, value: &str) -> FinanceResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        items.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, name: &str) -> FinanceResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        items.remove(name);
        Ok(())
    }
}
