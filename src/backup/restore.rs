//! Backup restoration
//!
//! A backup is an export document, so restoring one is an import. The same
//! validation applies and a bad file leaves the store untouched.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{FinanceError, FinanceResult};
use crate::services::FinanceStore;
use crate::storage::{decode, ImportReport};

fn read_backup(backup_path: &Path) -> FinanceResult<String> {
    fs::read_to_string(backup_path)
        .map_err(|e| FinanceError::Backup(format!("Failed to read backup file: {}", e)))
}

/// Replace the store's contents with a backup
pub fn restore_backup(store: &mut FinanceStore, backup_path: &Path) -> FinanceResult<ImportReport> {
    let contents = read_backup(backup_path)?;
    let report = store.import_data(&contents)?;
    info!(path = %backup_path.display(), records = report.records, "Restored backup");
    Ok(report)
}

/// Check that a backup would restore cleanly without touching any store
pub fn validate_backup(backup_path: &Path) -> FinanceResult<ImportReport> {
    let contents = read_backup(backup_path)?;
    let (_, report) = decode(&contents)?;
    Ok(report)
}
