//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the store. Entities are addressed by ID, by a
//! unique ID prefix, or by case-insensitive name.

pub mod account;
pub mod backup;
pub mod category;
pub mod credit;
pub mod data;
pub mod goal;
pub mod macros;
pub mod recurring;
pub mod report;
pub mod transaction;
pub mod transfer;

pub use account::{handle_account_command, AccountCommands};
pub use backup::{handle_backup_command, BackupCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use credit::{handle_credit_command, CreditCommands};
pub use data::{handle_config_command, handle_export, handle_import, handle_reset, ConfigCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use macros::{handle_macro_command, MacroCommands};
pub use recurring::{handle_recurring_command, RecurringCommands};
pub use report::{handle_report_command, handle_summary, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use transfer::{handle_transfer, TransferArgs};

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{AccountId, CategoryId, Money, MonthKey};
use crate::services::FinanceStore;

/// Parse a non-negative amount such as "80000", "1,000,000" or "12.50"
pub fn parse_amount(input: &str) -> FinanceResult<Money> {
    let amount = Money::parse(input).map_err(|e| {
        FinanceError::Validation(format!(
            "{}. Use a format like '1000.00' or '1,000'",
            e
        ))
    })?;
    if amount.is_negative() {
        return Err(FinanceError::Validation(format!(
            "Amount must not be negative: {}",
            input
        )));
    }
    Ok(amount)
}

/// Parse `YYYY-MM-DD` (noon local time) or a full RFC 3339 timestamp
pub fn parse_date(input: &str) -> FinanceResult<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.with_timezone(&Utc));
    }

    let invalid = || {
        FinanceError::Validation(format!(
            "Invalid date '{}'. Use YYYY-MM-DD or an RFC 3339 timestamp",
            input
        ))
    };
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| invalid())?;
    let noon = date.and_hms_opt(12, 0, 0).ok_or_else(invalid)?;
    Local
        .from_local_datetime(&noon)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(invalid)
}

/// Parse a `YYYY-MM` month, or the store's current month when absent
pub fn parse_month(store: &FinanceStore, input: Option<&str>) -> FinanceResult<MonthKey> {
    match input {
        Some(s) => s
            .parse::<MonthKey>()
            .map_err(|e| FinanceError::Validation(e.to_string())),
        None => Ok(store.current_month()),
    }
}

/// Find an item by exact ID, then name, then unique ID prefix
pub(crate) fn lookup<'a, T>(
    items: &'a [T],
    query: &str,
    id: impl Fn(&T) -> &str,
    name: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    if let Some(found) = items.iter().find(|item| id(*item) == query) {
        return Some(found);
    }
    if let Some(found) = items.iter().find(|item| name(*item).eq_ignore_ascii_case(query)) {
        return Some(found);
    }

    let mut prefixed = items.iter().filter(|item| id(*item).starts_with(query));
    match (prefixed.next(), prefixed.next()) {
        (Some(found), None) => Some(found),
        _ => None,
    }
}

pub fn resolve_account(store: &FinanceStore, query: &str) -> FinanceResult<AccountId> {
    lookup(store.accounts(), query, |a| a.id.as_str(), |a| &a.name)
        .map(|a| a.id.clone())
        .ok_or_else(|| FinanceError::account_not_found(query))
}

pub fn resolve_category(store: &FinanceStore, query: &str) -> FinanceResult<CategoryId> {
    lookup(store.categories(), query, |c| c.id.as_str(), |c| &c.name)
        .map(|c| c.id.clone())
        .ok_or_else(|| FinanceError::category_not_found(query))
}

/// Resolve an optional category argument
pub fn resolve_optional_category(
    store: &FinanceStore,
    query: Option<&str>,
) -> FinanceResult<Option<CategoryId>> {
    query.map(|q| resolve_category(store, q)).transpose()
}
