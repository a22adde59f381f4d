//! Backup system for the finance tracker
//!
//! Provides rolling backups with a retention count, and restore.
//!
//! # Backup Format
//!
//! A backup is the same JSON document produced by `export_data`: every
//! entity collection plus `version` and `exportedAt`. Any backup can also be
//! fed to `finance import`.
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::backup::{restore_backup, BackupManager};
//! use finance_tracker::config::{FinancePaths, Settings};
//!
//! let paths = FinancePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let manager = BackupManager::new(&paths, settings.backup_retention);
//!
//! let (path, _pruned) = manager.create_backup_with_retention(&store)?;
//! restore_backup(&mut store, &path)?;
//! ```

mod manager;
mod restore;

pub use manager::{BackupInfo, BackupManager};
pub use restore::{restore_backup, validate_backup};
