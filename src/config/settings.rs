//! User settings for the finance tracker
//!
//! Stored as `config.json` in the base directory.

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::FinanceError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// Backup retention settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of backups to keep; older ones are pruned
    pub keep: usize,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self { keep: 10 }
    }
}

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Symbol printed in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    #[serde(default)]
    pub backup_retention: BackupRetention,

    /// Take a backup before an import or a reset replaces the data
    #[serde(default = "default_true")]
    pub auto_backup: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            backup_retention: BackupRetention::default(),
            auto_backup: true,
        }
    }
}

impl Settings {
    /// Load settings from disk, or the defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        read_json(paths.settings_file()).map_err(|e| match e {
            FinanceError::Storage(msg) => {
                FinanceError::Config(format!("Failed to load settings: {}", msg))
            }
            other => other,
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Change a setting by key, as used by `finance config set`
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FinanceError> {
        match key {
            "currency_symbol" | "currency" => {
                self.currency_symbol = value.to_string();
            }
            "backup_retention" | "backup_keep" => {
                self.backup_retention.keep = value.parse().map_err(|_| {
                    FinanceError::Config(format!("Invalid backup retention count: {}", value))
                })?;
            }
            "auto_backup" => {
                self.auto_backup = value.parse().map_err(|_| {
                    FinanceError::Config(format!("Expected true or false, got: {}", value))
                })?;
            }
            _ => {
                return Err(FinanceError::Config(format!("Unknown setting: {}", key)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.backup_retention.keep, 10);
        assert!(settings.auto_backup);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path());

        assert_eq!(Settings::load_or_create(&paths).unwrap(), Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path());

        let mut settings = Settings::default();
        settings.set("currency", "€").unwrap();
        settings.set("backup_keep", "3").unwrap();
        settings.set("auto_backup", "false").unwrap();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.backup_retention.keep, 3);
        assert!(!loaded.auto_backup);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.set("backup_keep", "many").is_err());
        assert!(settings.set("theme", "dark").is_err());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "£"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "£");
        assert_eq!(settings.schema_version, 1);
        assert!(settings.auto_backup);
    }
}
