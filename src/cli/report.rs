//! Summary and report commands

use clap::Subcommand;

use super::parse_month;
use crate::config::Settings;
use crate::display::report::{
    format_budget_status, format_cash_flow_trend, format_dashboard, format_expenses_by_category,
};
use crate::error::FinanceResult;
use crate::services::FinanceStore;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Expenses grouped by category
    Spending {
        /// Month to report (YYYY-MM, default: current)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Income, expenses and net over recent months
    Cashflow {
        /// Last month of the range (YYYY-MM, default: current)
        #[arg(short, long)]
        month: Option<String>,
        /// Number of months
        #[arg(short = 'n', long, default_value = "6")]
        months: usize,
    },
    /// Spending against each category's monthly budget
    Budgets {
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Print the dashboard
pub fn handle_summary(store: &FinanceStore, settings: &Settings) -> FinanceResult<()> {
    print!("{}", format_dashboard(store, &settings.currency_symbol));
    Ok(())
}

/// Handle a report command
pub fn handle_report_command(
    store: &FinanceStore,
    settings: &Settings,
    cmd: ReportCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Spending { month } => {
            let month = parse_month(store, month.as_deref())?;
            let totals = store.expenses_by_category(Some(month));
            print!("{}", format_expenses_by_category(store, month, &totals, symbol));
        }

        ReportCommands::Cashflow { month, months } => {
            let end = parse_month(store, month.as_deref())?;
            let flows = store.cash_flow_trend(end, months);
            print!("{}", format_cash_flow_trend(&flows, symbol));
        }

        ReportCommands::Budgets { month } => {
            let month = parse_month(store, month.as_deref())?;
            print!("{}", format_budget_status(&store.category_budget_status(month), symbol));
        }
    }

    Ok(())
}
