//! Transaction display formatting
//!
//! Account and category names are resolved through the store; references
//! to deleted entities print as "Unknown".

use super::{render_table, Align};
use crate::models::{Transaction, TransactionType};
use crate::services::FinanceStore;

fn account_name<'a>(store: &'a FinanceStore, txn: &Transaction) -> &'a str {
    store
        .account(&txn.account_id)
        .map(|a| a.name.as_str())
        .unwrap_or("Unknown")
}

fn category_name<'a>(store: &'a FinanceStore, txn: &Transaction) -> &'a str {
    match &txn.category_id {
        Some(id) => store.category(id).map(|c| c.name.as_str()).unwrap_or("Unknown"),
        None => "",
    }
}

/// Short form of an ID for table columns
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn signed(txn: &Transaction, symbol: &str) -> String {
    match txn.kind {
        TransactionType::Expense => (-txn.amount).format_with_symbol(symbol),
        _ => txn.amount.format_with_symbol(symbol),
    }
}

/// Format transactions as a register table
pub fn format_transaction_list(
    store: &FinanceStore,
    transactions: &[&Transaction],
    symbol: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<Vec<String>> = transactions
        .iter()
        .map(|txn| {
            let category = if txn.is_transfer() {
                "Transfer".to_string()
            } else {
                category_name(store, txn).to_string()
            };
            vec![
                short_id(txn.id.as_str()).to_string(),
                txn.date.format("%Y-%m-%d").to_string(),
                account_name(store, txn).to_string(),
                category,
                txn.description.clone().unwrap_or_default(),
                signed(txn, symbol),
            ]
        })
        .collect();

    render_table(
        &[
            ("ID", Align::Left),
            ("Date", Align::Left),
            ("Account", Align::Left),
            ("Category", Align::Left),
            ("Description", Align::Left),
            ("Amount", Align::Right),
        ],
        &rows,
    )
}

/// Format a single transaction's details
pub fn format_transaction_details(store: &FinanceStore, txn: &Transaction, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("  Type:        {}\n", txn.kind));
    output.push_str(&format!("  Amount:      {}\n", txn.amount.format_with_symbol(symbol)));
    output.push_str(&format!("  Date:        {}\n", txn.date.to_rfc3339()));
    output.push_str(&format!("  Account:     {}\n", account_name(store, txn)));

    let category = category_name(store, txn);
    if !category.is_empty() {
        output.push_str(&format!("  Category:    {}\n", category));
    }
    if let Some(description) = &txn.description {
        output.push_str(&format!("  Description: {}\n", description));
    }
    if let Some(partner) = store.transfer_partner(&txn.id) {
        let direction = if txn.is_expense() { "To" } else { "From" };
        output.push_str(&format!(
            "  {:<12} {}\n",
            format!("{}:", direction),
            account_name(store, partner)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewTransaction};

    #[test]
    fn test_list_signs_expenses() {
        let mut store = FinanceStore::in_memory();
        let cash = store.accounts()[0].id.clone();
        let id = store
            .add_transaction(
                NewTransaction::expense(cash, Money::from_units(15)).with_description("Taxi"),
            )
            .unwrap();

        let txn = store.transaction(&id).unwrap();
        let output = format_transaction_list(&store, &[txn], "$");
        assert!(output.contains("Taxi"));
        assert!(output.contains("-$15.00"));
        assert!(output.contains(short_id(id.as_str())));
    }

    #[test]
    fn test_details_name_transfer_partner() {
        let mut store = FinanceStore::in_memory();
        let cash = store.accounts()[0].id.clone();
        let bank = store.accounts()[1].id.clone();
        let receipt = store
            .create_transfer(&bank, &cash, Money::from_units(50), None, None, None)
            .unwrap();

        let debit = store.transaction(&receipt.debit_id).unwrap();
        let output = format_transaction_details(&store, debit, "$");
        assert!(output.contains("Account:     Bank"));
        assert!(output.contains("To:          Cash"));
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("abcdef123456"), "abcdef12");
        assert_eq!(short_id("abc"), "abc");
    }
}
