//! CSV export
//!
//! Exports transactions and account balances for spreadsheets. Names are
//! resolved at export time; dangling references show as "Unknown".

use std::collections::HashMap;
use std::io::Write;

use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;
use crate::services::FinanceStore;

fn export_err(e: impl ToString) -> FinanceError {
    FinanceError::Export(e.to_string())
}

/// Amount as a plain two-decimal number, without a currency symbol
fn decimal_cell(amount: Money) -> String {
    format!("{:.2}", amount.amount().round_dp(2))
}

/// Export all transactions to CSV, newest first
pub fn export_transactions_csv<W: Write>(store: &FinanceStore, writer: W) -> FinanceResult<()> {
    let account_names: HashMap<_, _> = store
        .accounts()
        .iter()
        .map(|a| (&a.id, a.name.as_str()))
        .collect();
    let category_names: HashMap<_, _> = store
        .categories()
        .iter()
        .map(|c| (&c.id, c.name.as_str()))
        .collect();

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record([
            "ID",
            "Date",
            "Type",
            "Account",
            "Category",
            "Description",
            "Amount",
            "Transfer ID",
        ])
        .map_err(export_err)?;

    for txn in store.transactions() {
        let account = account_names
            .get(&txn.account_id)
            .copied()
            .unwrap_or("Unknown");
        let category = match &txn.category_id {
            Some(id) => category_names.get(id).copied().unwrap_or("Unknown"),
            None => "",
        };
        let amount = decimal_cell(txn.amount);

        csv_writer
            .write_record([
                txn.id.as_str(),
                &txn.date.to_rfc3339(),
                &txn.kind.to_string(),
                account,
                category,
                txn.description.as_deref().unwrap_or(""),
                &amount,
                txn.transfer_id.as_ref().map(|t| t.as_str()).unwrap_or(""),
            ])
            .map_err(export_err)?;
    }

    csv_writer.flush().map_err(export_err)?;
    Ok(())
}

/// Export accounts with their computed balances to CSV
pub fn export_accounts_csv<W: Write>(store: &FinanceStore, writer: W) -> FinanceResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["ID", "Name", "Type", "Balance", "Target", "Transactions"])
        .map_err(export_err)?;

    for summary in store.account_summaries() {
        let account = &summary.account;
        csv_writer
            .write_record([
                account.id.as_str(),
                &account.name,
                &account.account_type.to_string(),
                &decimal_cell(summary.balance),
                &account.target_amount.map(decimal_cell).unwrap_or_default(),
                &summary.transaction_count.to_string(),
            ])
            .map_err(export_err)?;
    }

    csv_writer.flush().map_err(export_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;

    #[test]
    fn test_transactions_csv() {
        let mut store = FinanceStore::in_memory();
        let bank = store.accounts()[1].id.clone();
        let food = store.find_category("Food").unwrap().id.clone();
        store
            .add_transaction(
                NewTransaction::expense(bank, Money::from_units(12))
                    .with_description("Lunch, with friends")
                    .with_category(Some(food)),
            )
            .unwrap();

        let mut output = Vec::new();
        export_transactions_csv(&store, &mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID,Date,Type,Account"));
        assert!(lines[1].contains(",Expense,Bank,Food,\"Lunch, with friends\",12.00,"));
    }

    #[test]
    fn test_accounts_csv_has_balances() {
        let mut store = FinanceStore::in_memory();
        let cash = store.accounts()[0].id.clone();
        store
            .add_transaction(NewTransaction::income(cash, Money::from_units(40)))
            .unwrap();

        let mut output = Vec::new();
        export_accounts_csv(&store, &mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();

        assert_eq!(csv.lines().count(), 3);
        assert!(csv.contains(",Cash,Cash,40.00,,1"));
    }
}
