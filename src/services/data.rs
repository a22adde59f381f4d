//! Whole-state operations: export, import and reset

use tracing::{error, info, warn};

use crate::error::{FinanceError, FinanceResult};
use crate::models::FinanceState;
use crate::storage::{decode, encode, ImportReport};

use super::FinanceStore;

impl FinanceStore {
    /// Serialize every collection, the format version and the export time
    pub fn export_data(&self) -> FinanceResult<String> {
        let json = encode(&self.state, Some(self.now()), true)?;
        info!(records = self.state.record_count(), "Exported finance data");
        Ok(json)
    }

    /// Replace the whole state with a decoded document
    ///
    /// Nothing is merged: collections missing from the document become
    /// empty. If the document fails to parse or validate the error is logged
    /// and returned and the current state is left untouched.
    pub fn import_data(&mut self, json: &str) -> FinanceResult<ImportReport> {
        let (state, report) = match decode(json) {
            Ok(decoded) => decoded,
            Err(e) => {
                error!(error = %e, "Rejected import");
                return Err(FinanceError::Import(e));
            }
        };

        if !report.missing.is_empty() {
            warn!(missing = ?report.missing, "Imported document lacks some collections");
        }

        self.state = state;
        info!(records = report.records, "Imported finance data");
        self.commit();
        Ok(report)
    }

    /// Throw everything away and start over from the default seed
    pub fn reset_all_data(&mut self) {
        self.state = FinanceState::seeded();
        info!("Reset finance data to defaults");
        self.commit();
    }
}
