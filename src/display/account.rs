//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use super::{render_table, Align};
use crate::models::Money;
use crate::services::AccountSummary;

/// Format a list of accounts with balances as a table
pub fn format_account_list(summaries: &[AccountSummary], symbol: &str) -> String {
    if summaries.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let mut rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| {
            vec![
                s.account.name.clone(),
                s.account.account_type.to_string(),
                s.balance.format_with_symbol(symbol),
                s.account
                    .target_amount
                    .map(|t| t.format_with_symbol(symbol))
                    .unwrap_or_default(),
                s.transaction_count.to_string(),
            ]
        })
        .collect();

    let total: Money = summaries.iter().map(|s| s.balance).sum();
    rows.push(Vec::new());
    rows.push(vec![
        "TOTAL".into(),
        String::new(),
        total.format_with_symbol(symbol),
    ]);

    render_table(
        &[
            ("Name", Align::Left),
            ("Type", Align::Left),
            ("Balance", Align::Right),
            ("Target", Align::Right),
            ("Txns", Align::Right),
        ],
        &rows,
    )
}

/// Format a single account's details
pub fn format_account_details(summary: &AccountSummary, symbol: &str) -> String {
    let account = &summary.account;

    let mut output = String::new();
    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  Type:         {}\n", account.account_type));
    output.push_str(&format!("  ID:           {}\n", account.id));
    output.push_str(&format!(
        "  Spendable:    {}\n",
        if account.account_type.is_spendable() { "Yes" } else { "No" }
    ));
    output.push_str(&format!(
        "  Balance:      {}\n",
        summary.balance.format_with_symbol(symbol)
    ));
    if let Some(target) = account.target_amount {
        output.push_str(&format!("  Target:       {}\n", target.format_with_symbol(symbol)));
        output.push_str(&format!(
            "  To target:    {}\n",
            target.saturating_sub(summary.balance).format_with_symbol(symbol)
        ));
    }
    output.push_str(&format!("  Transactions: {}\n", summary.transaction_count));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType};

    fn summary(name: &str, balance: i64) -> AccountSummary {
        AccountSummary {
            account: Account::new(name, AccountType::Savings).with_target_amount(Money::from_units(500)),
            balance: Money::from_units(balance),
            transaction_count: 2,
        }
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_account_list(&[], "$"), "No accounts found.\n");
    }

    #[test]
    fn test_list_has_total() {
        let output = format_account_list(&[summary("Rainy day", 200), summary("Trip", 50)], "€");
        assert!(output.contains("Rainy day"));
        assert!(output.contains("€500.00"));
        assert!(output.lines().last().unwrap().contains("€250.00"));
    }

    #[test]
    fn test_details_show_distance_to_target() {
        let output = format_account_details(&summary("Rainy day", 200), "$");
        assert!(output.contains("Spendable:    No"));
        assert!(output.contains("To target:    $300.00"));
    }
}
