//! JSON export
//!
//! Writes the same document `export_data` produces.

use std::io::Write;

use crate::error::{FinanceError, FinanceResult};
use crate::services::FinanceStore;

/// Export the full store to JSON
pub fn export_full_json<W: Write>(store: &FinanceStore, writer: &mut W) -> FinanceResult<()> {
    let json = store.export_data()?;
    writer
        .write_all(json.as_bytes())
        .and_then(|_| writeln!(writer))
        .map_err(|e| FinanceError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_export_is_importable() {
        let store = FinanceStore::in_memory();
        let mut output = Vec::new();
        export_full_json(&store, &mut output).unwrap();

        let json = String::from_utf8(output).unwrap();
        let mut other = FinanceStore::in_memory();
        other.import_data(&json).unwrap();
        assert_eq!(other.state(), store.state());
    }
}
