//! Export, import, reset and config commands
//!
//! Import and reset replace every collection, so both take a backup first
//! when `auto_backup` is on.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::backup::BackupManager;
use crate::config::paths::FinancePaths;
use crate::config::settings::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::export::{
    export_accounts_csv, export_full_json, export_full_yaml, export_transactions_csv,
    import_from_yaml, ExportFormat,
};
use crate::services::FinanceStore;
use crate::storage::ImportReport;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show settings and paths
    Show,
    /// Change a setting (currency_symbol, backup_retention, auto_backup)
    Set { key: String, value: String },
}

fn safety_backup(store: &FinanceStore, paths: &FinancePaths, settings: &Settings) -> FinanceResult<()> {
    if settings.auto_backup {
        let manager = BackupManager::new(paths, settings.backup_retention.clone());
        let (path, _) = manager.create_backup_with_retention(store)?;
        eprintln!("Saved current data to {}", path.display());
    }
    Ok(())
}

fn write_export<W: Write>(
    store: &FinanceStore,
    format: ExportFormat,
    accounts: bool,
    writer: &mut W,
) -> FinanceResult<()> {
    match (format, accounts) {
        (ExportFormat::Csv, true) => export_accounts_csv(store, writer),
        (ExportFormat::Csv, false) => export_transactions_csv(store, writer),
        (_, true) => Err(FinanceError::Export(
            "--accounts is only available with the csv format".into(),
        )),
        (ExportFormat::Json, false) => export_full_json(store, writer),
        (ExportFormat::Yaml, false) => export_full_yaml(store, writer),
    }
}

/// Write an export to `output`, or stdout when no file is given
pub fn handle_export(
    store: &FinanceStore,
    output: Option<PathBuf>,
    format: Option<ExportFormat>,
    accounts: bool,
) -> FinanceResult<()> {
    let format = format
        .or_else(|| output.as_deref().map(ExportFormat::from_path))
        .unwrap_or(ExportFormat::Json);

    match output {
        Some(path) => {
            let file = File::create(&path)
                .map_err(|e| FinanceError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
            let mut writer = BufWriter::new(file);
            write_export(store, format, accounts, &mut writer)?;
            writer
                .flush()
                .map_err(|e| FinanceError::Export(e.to_string()))?;
            eprintln!("Exported {} to {}", format, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_export(store, format, accounts, &mut lock)?;
        }
    }
    Ok(())
}

fn is_yaml(path: &Path) -> bool {
    ExportFormat::from_path(path) == ExportFormat::Yaml
}

/// Replace all data with the contents of an export file
pub fn handle_import(
    store: &mut FinanceStore,
    paths: &FinancePaths,
    settings: &Settings,
    file: &Path,
) -> FinanceResult<()> {
    let contents = fs::read_to_string(file)
        .map_err(|e| FinanceError::Io(format!("Failed to read {}: {}", file.display(), e)))?;

    safety_backup(store, paths, settings)?;

    let report: ImportReport = if is_yaml(file) {
        import_from_yaml(store, &contents)?
    } else {
        store.import_data(&contents)?
    };

    println!("Imported {} record(s) from {}", report.records, file.display());
    if !report.is_complete() {
        println!(
            "Warning: the file had no {}; those are now empty",
            report.missing.join(", ")
        );
    }
    Ok(())
}

/// Start over from the default accounts and categories
pub fn handle_reset(
    store: &mut FinanceStore,
    paths: &FinancePaths,
    settings: &Settings,
    force: bool,
) -> FinanceResult<()> {
    if !force {
        println!("This deletes all accounts, transactions and plans.");
        println!("Re-run with --force to continue.");
        return Ok(());
    }

    safety_backup(store, paths, settings)?;
    store.reset_all_data();
    println!("All data reset to defaults.");
    Ok(())
}

/// Handle a config command
pub fn handle_config_command(
    paths: &FinancePaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> FinanceResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("Finance Tracker Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data file:        {}", paths.store_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  currency_symbol:  {}", settings.currency_symbol);
            println!("  backup_retention: {}", settings.backup_retention.keep);
            println!("  auto_backup:      {}", settings.auto_backup);
        }

        ConfigCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }
    Ok(())
}
