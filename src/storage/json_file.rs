//! On-disk backing store
//!
//! Each key is one `<name>.json` file inside a data directory, replaced
//! atomically on every write.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FinanceError, FinanceResult};

use super::file_io::{read_string, write_atomic};
use super::StateStorage;

#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> FinanceResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            FinanceError::Storage(format!("Failed to create directory {}: {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file backing a key
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

impl StateStorage for JsonFileStorage {
    fn get_item(&self, name: &str) -> FinanceResult<Option<String>> {
        read_string(self.path_for(name))
    }

    fn set_item(&self, name: &str, value: &str) -> FinanceResult<()> {
        write_atomic(self.path_for(name), value.as_bytes())
    }

    fn remove_item(&self, name: &str) -> FinanceResult<()> {
        let path = self.path_for(name);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(&path).map_err(|e| {
            FinanceError::Storage(format!("Failed to remove {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_is_byte_for_byte() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("data")).unwrap();
        let payload = "{\"accounts\":[],\n \"version\": 1}";

        storage.set_item("finance-store", payload).unwrap();
        assert!(temp_dir.path().join("data").join("finance-store.json").exists());
        assert_eq!(storage.get_item("finance-store").unwrap().as_deref(), Some(payload));
    }

    #[test]
    fn test_missing_key_and_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path()).unwrap();

        assert!(storage.get_item("absent").unwrap().is_none());
        storage.remove_item("absent").unwrap();

        storage.set_item("k", "{}").unwrap();
        storage.remove_item("k").unwrap();
        assert!(!storage.path_for("k").exists());
    }
}
