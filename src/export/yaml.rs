//! YAML export
//!
//! Writes the export document as YAML for human-readable backup. The YAML
//! form goes back through the JSON import path, so the same validation
//! applies to both.

use std::io::Write;

use serde_json::Value;

use crate::error::{FinanceError, FinanceResult, ImportError};
use crate::services::FinanceStore;
use crate::storage::ImportReport;

fn export_err(e: impl ToString) -> FinanceError {
    FinanceError::Export(e.to_string())
}

/// Export the full store to YAML
pub fn export_full_yaml<W: Write>(store: &FinanceStore, writer: &mut W) -> FinanceResult<()> {
    let document: Value = serde_json::from_str(&store.export_data()?)?;

    writeln!(writer, "# Finance Tracker Data Export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", store.now().to_rfc3339()).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", env!("CARGO_PKG_VERSION")).map_err(export_err)?;
    writeln!(writer, "#").map_err(export_err)?;
    writeln!(writer, "# Restore with: finance import <this file>").map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &document).map_err(export_err)?;

    Ok(())
}

/// Replace the store's contents with a YAML export
pub fn import_from_yaml(store: &mut FinanceStore, yaml_str: &str) -> FinanceResult<ImportReport> {
    let document: Value = serde_yaml::from_str(yaml_str)
        .map_err(|e| FinanceError::Import(ImportError::Parse(e.to_string())))?;
    let json = serde_json::to_string(&document)?;
    store.import_data(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Goal, Money};

    #[test]
    fn test_yaml_export() {
        let mut store = FinanceStore::in_memory();
        store
            .add_goal(Goal::new("Vacation", Money::from_units(500)))
            .unwrap();

        let mut output = Vec::new();
        export_full_yaml(&store, &mut output).unwrap();

        let yaml = String::from_utf8(output).unwrap();
        assert!(yaml.starts_with("# Finance Tracker Data Export"));
        assert!(yaml.contains("Vacation"));
        assert!(yaml.contains("macroGroups"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut store = FinanceStore::in_memory();
        store
            .add_goal(Goal::new("Laptop", Money::from_units(1200)))
            .unwrap();
        let mut output = Vec::new();
        export_full_yaml(&store, &mut output).unwrap();

        let mut restored = FinanceStore::in_memory();
        let report = import_from_yaml(&mut restored, &String::from_utf8(output).unwrap()).unwrap();

        assert!(report.is_complete());
        assert_eq!(restored.state(), store.state());
    }

    #[test]
    fn test_yaml_import_rejects_garbage() {
        let mut store = FinanceStore::in_memory();
        let before = store.state().clone();

        assert!(import_from_yaml(&mut store, "accounts: [").is_err());
        assert!(import_from_yaml(&mut store, "- just\n- a list\n").is_err());
        assert_eq!(store.state(), &before);
    }
}
