//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use clap::Subcommand;
use std::path::PathBuf;

use crate::backup::{restore_backup, validate_backup, BackupInfo, BackupManager};
use crate::config::paths::FinancePaths;
use crate::config::settings::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::services::FinanceStore;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup
    Create,

    /// List all available backups
    List,

    /// Restore from a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Confirm replacing all current data
        #[arg(short, long)]
        force: bool,
    },

    /// Check that a backup can be restored
    Info {
        /// Backup filename or path
        backup: String,
    },

    /// Delete old backups according to the retention setting
    Prune,
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

fn locate_backup(manager: &BackupManager, backup: &str) -> FinanceResult<PathBuf> {
    if backup == "latest" {
        return manager
            .get_latest_backup()?
            .map(|info| info.path)
            .ok_or_else(|| FinanceError::Backup("No backups found".into()));
    }

    if let Some(info) = manager.get_backup(backup) {
        return Ok(info.path);
    }

    let path = PathBuf::from(backup);
    if path.exists() {
        Ok(path)
    } else {
        Err(FinanceError::Backup(format!("Backup not found: {}", backup)))
    }
}

/// Handle a backup command
pub fn handle_backup_command(
    store: &mut FinanceStore,
    paths: &FinancePaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> FinanceResult<()> {
    let manager = BackupManager::new(paths, settings.backup_retention.clone());

    match cmd {
        BackupCommands::Create => {
            let (backup_path, pruned) = manager.create_backup_with_retention(store)?;
            println!("Backup created: {}", backup_path.display());
            if !pruned.is_empty() {
                println!("Removed {} old backup(s)", pruned.len());
            }
        }

        BackupCommands::List => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: finance backup create");
                return Ok(());
            }

            println!("Available Backups ({})", manager.backup_dir().display());
            println!();
            for BackupInfo {
                filename,
                created_at,
                size_bytes,
                ..
            } in &backups
            {
                println!(
                    "  {}  {}  {:>9}",
                    filename,
                    created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                    format_size(*size_bytes)
                );
            }
            println!();
            println!(
                "{} backup(s), keeping the newest {}",
                backups.len(),
                settings.backup_retention.keep
            );
        }

        BackupCommands::Restore { backup, force } => {
            let path = locate_backup(&manager, &backup)?;
            let report = validate_backup(&path)?;

            if !force {
                println!(
                    "Backup {} holds {} record(s).",
                    path.display(),
                    report.records
                );
                println!("Restoring replaces all current data. Re-run with --force to continue.");
                return Ok(());
            }

            if settings.auto_backup {
                let (safety, _) = manager.create_backup_with_retention(store)?;
                println!("Saved current data to {}", safety.display());
            }
            let report = restore_backup(store, &path)?;
            println!("Restored {} record(s) from {}", report.records, path.display());
        }

        BackupCommands::Info { backup } => {
            let path = locate_backup(&manager, &backup)?;
            let report = validate_backup(&path)?;

            println!("Backup: {}", path.display());
            if let Some(exported_at) = report.exported_at {
                println!("  Exported at: {}", exported_at.to_rfc3339());
            }
            if let Some(version) = report.version {
                println!("  Version:     {}", version);
            }
            println!("  Records:     {}", report.records);
            if !report.is_complete() {
                println!("  Missing:     {}", report.missing.join(", "));
            }
            println!("  Status:      valid");
        }

        BackupCommands::Prune => {
            let deleted = manager.enforce_retention()?;
            println!("Removed {} old backup(s)", deleted.len());
        }
    }

    Ok(())
}
