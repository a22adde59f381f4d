//! Storage layer for the finance tracker
//!
//! The whole state is persisted as one JSON document under a fixed key.
//! Backends implement [`StateStorage`]; the [`Repository`] owns the
//! encoding and is what the store talks to.

pub mod document;
pub mod file_io;
pub mod json_file;
pub mod memory;

pub use document::{decode, encode, ImportReport, COLLECTION_KEYS, DOCUMENT_VERSION};
pub use file_io::{read_json, write_json_atomic};
pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

use std::path::PathBuf;

use crate::error::{FinanceError, FinanceResult};
use crate::models::FinanceState;

/// Key the state document is stored under
pub const STORE_NAME: &str = "finance-store";

/// A key/value backend holding opaque serialized blobs
///
/// Implementations must return exactly the bytes they were given.
pub trait StateStorage: Send + Sync {
    fn get_item(&self, name: &str) -> FinanceResult<Option<String>>;
    fn set_item(&self, name: &str, value: &str) -> FinanceResult<()>;
    fn remove_item(&self, name: &str) -> FinanceResult<()>;
}

/// Loads and saves the finance state through a backend
pub struct Repository {
    backend: Box<dyn StateStorage>,
    name: String,
}

impl Repository {
    /// Create a repository over `backend` using the default store name
    pub fn new(backend: impl StateStorage + 'static) -> Self {
        Self::with_name(backend, STORE_NAME)
    }

    pub fn with_name(backend: impl StateStorage + 'static, name: impl Into<String>) -> Self {
        Self {
            backend: Box::new(backend),
            name: name.into(),
        }
    }

    /// A repository that forgets everything when dropped
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// A repository writing `<dir>/finance-store.json`
    pub fn json_file(dir: impl Into<PathBuf>) -> FinanceResult<Self> {
        Ok(Self::new(JsonFileStorage::new(dir)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Load the persisted state, or None if nothing was saved yet
    pub fn load(&self) -> FinanceResult<Option<FinanceState>> {
        let Some(json) = self.backend.get_item(&self.name)? else {
            return Ok(None);
        };

        let (state, _) = decode(&json).map_err(|e| {
            FinanceError::Storage(format!("Stored document '{}' is invalid: {}", self.name, e))
        })?;
        Ok(Some(state))
    }

    /// Persist the state, replacing whatever was stored
    pub fn save(&self, state: &FinanceState) -> FinanceResult<()> {
        let json = encode(state, None, false)?;
        self.backend.set_item(&self.name, &json)
    }

    /// Remove the persisted state
    pub fn clear(&self) -> FinanceResult<()> {
        self.backend.remove_item(&self.name)
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository").field("name", &self.name).finish()
    }
}
