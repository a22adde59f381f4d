//! Backup manager for the finance tracker
//!
//! Backups are full export documents written to the backup directory as
//! `backup-YYYYMMDD-HHMMSS-mmm.json`. Only the newest `keep` backups are
//! retained.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::config::paths::FinancePaths;
use crate::config::settings::BackupRetention;
use crate::error::{FinanceError, FinanceResult};
use crate::services::FinanceStore;
use crate::storage::file_io::write_atomic;

/// Metadata about a backup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    /// When the backup was created, from its filename
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
}

/// Manages backup creation and retention
pub struct BackupManager {
    backup_dir: PathBuf,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: &FinancePaths, retention: BackupRetention) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            retention,
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Write the store's export document to a new backup file
    ///
    /// Returns the path to the created backup file.
    pub fn create_backup(&self, store: &FinanceStore) -> FinanceResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            FinanceError::Backup(format!("Failed to create backup directory: {}", e))
        })?;

        let now = store.now();
        let filename = format!(
            "backup-{}-{:03}.json",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(&filename);

        let json = store.export_data()?;
        write_atomic(&backup_path, json.as_bytes())
            .map_err(|e| FinanceError::Backup(format!("Failed to write backup file: {}", e)))?;

        info!(path = %backup_path.display(), "Created backup");
        Ok(backup_path)
    }

    /// All backups, newest first
    pub fn list_backups(&self) -> FinanceResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            FinanceError::Backup(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                FinanceError::Backup(format!("Failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(backups)
    }

    /// Delete all but the newest `keep` backups, returning what was removed
    pub fn enforce_retention(&self) -> FinanceResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();

        for backup in self.list_backups()?.into_iter().skip(self.retention.keep) {
            fs::remove_file(&backup.path).map_err(|e| {
                FinanceError::Backup(format!("Failed to delete old backup: {}", e))
            })?;
            debug!(path = %backup.path.display(), "Pruned backup");
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    /// Create a backup and then enforce the retention policy
    pub fn create_backup_with_retention(
        &self,
        store: &FinanceStore,
    ) -> FinanceResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup(store)?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    /// Find a backup by filename
    pub fn get_backup(&self, filename: &str) -> Option<BackupInfo> {
        let path = self.backup_dir.join(filename);
        if path.exists() {
            parse_backup_info(&path)
        } else {
            None
        }
    }

    pub fn get_latest_backup(&self) -> FinanceResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let date_part = filename.strip_prefix("backup-")?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(date_part)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
    })
}

/// Parse `YYYYMMDD-HHMMSS` or `YYYYMMDD-HHMMSS-mmm`
fn parse_backup_timestamp(date_str: &str) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let date_part = parts[0];
    let time_part = parts[1];
    let millis: u32 = match parts.get(2) {
        Some(ms) => ms.parse().ok()?,
        None => 0,
    };

    let is_digits =
        |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(date_part, 8) || !is_digits(time_part, 6) {
        return None;
    }

    let year: i32 = date_part[0..4].parse().ok()?;
    let month: u32 = date_part[4..6].parse().ok()?;
    let day: u32 = date_part[6..8].parse().ok()?;
    let hour: u32 = time_part[0..2].parse().ok()?;
    let minute: u32 = time_part[2..4].parse().ok()?;
    let second: u32 = time_part[4..6].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = chrono::NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;

    Some(DateTime::from_naive_utc_and_offset(
        chrono::NaiveDateTime::new(date, time),
        Utc,
    ))
}
