//! Display formatting for terminal output
//!
//! Formatters return strings; the CLI handlers print them. Amounts are
//! rendered with the currency symbol from the user's settings.

pub mod account;
pub mod category;
pub mod planning;
pub mod report;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use category::{format_category_details, format_category_tree};
pub use planning::{format_credit_list, format_goal_list, format_macro_groups, format_recurring_list};
pub use report::{
    format_budget_status, format_cash_flow_trend, format_dashboard, format_expenses_by_category,
};
pub use transaction::{format_transaction_details, format_transaction_list};

/// Column alignment for [`render_table`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Right,
}

/// Render rows under a header with a dashed separator
///
/// An empty row draws another separator, used before totals.
pub(crate) fn render_table(columns: &[(&str, Align)], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|(title, _)| title.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render_row = |cells: &[String]| -> String {
        let line = columns
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, ((_, align), width))| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                match align {
                    Align::Left => format!("{:<width$}", cell, width = width),
                    Align::Right => format!("{:>width$}", cell, width = width),
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        format!("{}\n", line.trim_end())
    };
    let separator = format!(
        "{}\n",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ")
    );

    let header: Vec<String> = columns.iter().map(|(t, _)| t.to_string()).collect();
    let mut output = render_row(&header);
    output.push_str(&separator);
    for row in rows {
        if row.is_empty() {
            output.push_str(&separator);
        } else {
            output.push_str(&render_row(row));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_aligns_columns() {
        let table = render_table(
            &[("Name", Align::Left), ("Amount", Align::Right)],
            &[
                vec!["Rent".into(), "$900.00".into()],
                vec![],
                vec!["TOTAL".into(), "$900.00".into()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Name    Amount");
        assert_eq!(lines[1], "-----  -------");
        assert_eq!(lines[2], "Rent   $900.00");
        assert_eq!(lines[3], "-----  -------");
        assert_eq!(lines[4], "TOTAL  $900.00");
    }
}
