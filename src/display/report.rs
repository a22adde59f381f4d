//! Report formatting for terminal output
//!
//! The dashboard and the monthly spending, cash flow and budget reports.

use super::{render_table, Align};
use crate::models::{Money, MonthKey};
use crate::services::{CashFlow, CategoryBudgetStatus, CategoryTotal, FinanceStore};

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// The overview printed by `finance summary`
pub fn format_dashboard(store: &FinanceStore, symbol: &str) -> String {
    let month = store.current_month();
    let flow = store.cash_flow(month);
    let line = |label: &str, amount: Money| {
        format!("  {:<24}{:>16}\n", label, amount.format_with_symbol(symbol))
    };

    let mut output = String::new();
    output.push_str(&format!("Finance summary for {}\n", month));
    output.push_str(&separator(42));
    output.push('\n');
    output.push_str(&line("Total balance", store.total_balance()));
    output.push_str(&line("Spendable balance", store.total_spendable_balance()));
    output.push_str(&line("Monthly obligations", store.monthly_obligations_total()));
    output.push_str(&line("Still due this month", store.monthly_obligations_remaining()));
    output.push_str(&separator(42));
    output.push('\n');
    output.push_str(&line("Safe to spend", store.safe_to_spend()));
    output.push('\n');
    output.push_str(&line("Income this month", flow.income));
    output.push_str(&line("Expenses this month", flow.expenses));
    output.push_str(&line("Net", flow.net()));
    output
}

/// Spending per category with a proportional bar
pub fn format_expenses_by_category(
    store: &FinanceStore,
    month: MonthKey,
    totals: &[CategoryTotal],
    symbol: &str,
) -> String {
    if totals.is_empty() {
        return format!("No expenses in {}.\n", month);
    }

    let grand_total: Money = totals.iter().map(|t| t.total).sum();
    let max = totals.iter().map(|t| t.total.to_f64()).fold(0.0, f64::max);

    let mut rows: Vec<Vec<String>> = totals
        .iter()
        .map(|t| {
            let name = match &t.category_id {
                Some(id) => store
                    .category(id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                None => "Uncategorized".to_string(),
            };
            let share = if grand_total.is_positive() {
                t.total.to_f64() / grand_total.to_f64() * 100.0
            } else {
                0.0
            };
            vec![
                name,
                t.total.format_with_symbol(symbol),
                format_percentage(share),
                format_bar(t.total.to_f64(), max, 20),
            ]
        })
        .collect();
    rows.push(Vec::new());
    rows.push(vec!["TOTAL".into(), grand_total.format_with_symbol(symbol)]);

    let mut output = format!("Expenses by category, {}\n\n", month);
    output.push_str(&render_table(
        &[
            ("Category", Align::Left),
            ("Spent", Align::Right),
            ("Share", Align::Right),
            ("", Align::Left),
        ],
        &rows,
    ));
    output
}

/// Income, expenses and net per month
pub fn format_cash_flow_trend(flows: &[CashFlow], symbol: &str) -> String {
    if flows.is_empty() {
        return "No months to show.\n".to_string();
    }

    let rows: Vec<Vec<String>> = flows
        .iter()
        .map(|f| {
            vec![
                f.month.to_string(),
                f.income.format_with_symbol(symbol),
                f.expenses.format_with_symbol(symbol),
                f.net().format_with_symbol(symbol),
            ]
        })
        .collect();

    render_table(
        &[
            ("Month", Align::Left),
            ("Income", Align::Right),
            ("Expenses", Align::Right),
            ("Net", Align::Right),
        ],
        &rows,
    )
}

/// Budgeted categories with what is left for the month
pub fn format_budget_status(statuses: &[CategoryBudgetStatus], symbol: &str) -> String {
    if statuses.is_empty() {
        return "No categories have a monthly budget.\n".to_string();
    }

    let rows: Vec<Vec<String>> = statuses
        .iter()
        .map(|s| {
            vec![
                s.category.name.clone(),
                s.budget.format_with_symbol(symbol),
                s.spent.format_with_symbol(symbol),
                s.remaining().format_with_symbol(symbol),
                format_percentage(s.percent_used()),
                if s.is_over_budget() { "OVER".into() } else { String::new() },
            ]
        })
        .collect();

    render_table(
        &[
            ("Category", Align::Left),
            ("Budget", Align::Right),
            ("Spent", Align::Right),
            ("Left", Align::Right),
            ("Used", Align::Right),
            ("", Align::Left),
        ],
        &rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, NewTransaction};

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.0), "5.0%");
        assert_eq!(format_percentage(50.0), "50%");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(50.0, 100.0, 10), "█████░░░░░");
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_dashboard_shows_safe_to_spend() {
        let store = FinanceStore::in_memory();
        let output = format_dashboard(&store, "$");
        assert!(output.contains("Safe to spend"));
        assert!(output.contains("$0.00"));
    }

    #[test]
    fn test_expenses_report_names_buckets() {
        let mut store = FinanceStore::in_memory();
        let cash = store.accounts()[0].id.clone();
        let food = store.find_category("Food").unwrap().id.clone();
        store
            .add_transaction(NewTransaction::expense(cash.clone(), Money::from_units(30)).with_category(Some(food)))
            .unwrap();
        store
            .add_transaction(NewTransaction::expense(cash, Money::from_units(10)))
            .unwrap();

        let month = store.current_month();
        let totals = store.expenses_by_category(Some(month));
        let output = format_expenses_by_category(&store, month, &totals, "$");

        assert!(output.contains("Food"));
        assert!(output.contains("Uncategorized"));
        assert!(output.contains("75%"));
        assert!(output.contains("$40.00"));
    }

    #[test]
    fn test_budget_status_flags_overspending() {
        let status = CategoryBudgetStatus {
            category: Category::new("Fun"),
            budget: Money::from_units(100),
            spent: Money::from_units(120),
        };
        let output = format_budget_status(&[status], "$");
        assert!(output.contains("-$20.00"));
        assert!(output.contains("120%"));
        assert!(output.contains("OVER"));
    }
}
