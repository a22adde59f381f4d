//! Transaction CLI commands

use clap::Subcommand;

use super::{lookup, parse_amount, parse_date, parse_month, resolve_account, resolve_optional_category};
use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_list};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{NewTransaction, TransactionId, TransactionPatch, TransactionType};
use crate::services::FinanceStore;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an expense, or an income with --income
    Add {
        /// Account name or ID
        account: String,
        /// Amount, always positive
        amount: String,
        /// Record money coming in instead of going out
        #[arg(short, long)]
        income: bool,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Transaction date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Filter by account
        #[arg(short, long)]
        account: Option<String>,
        /// Only transactions in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show a transaction
    Show {
        /// Transaction ID or unique prefix
        id: String,
    },
    /// Edit a transaction. Amount, date and description changes also apply
    /// to the other leg of a transfer.
    Edit {
        /// Transaction ID or unique prefix
        id: String,
        #[arg(long)]
        amount: Option<String>,
        /// New type (expense, income)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Move to another account
        #[arg(short, long)]
        account: Option<String>,
        #[arg(short, long, conflicts_with = "no_category")]
        category: Option<String>,
        /// Remove the category
        #[arg(long)]
        no_category: bool,
    },
    /// Delete a transaction; deleting a transfer leg deletes both legs
    Delete {
        /// Transaction ID or unique prefix
        id: String,
    },
}

fn resolve_transaction(store: &FinanceStore, query: &str) -> FinanceResult<TransactionId> {
    lookup(store.transactions(), query, |t| t.id.as_str(), |_| "")
        .map(|t| t.id.clone())
        .ok_or_else(|| FinanceError::transaction_not_found(query))
}

/// Handle a transaction command
pub fn handle_transaction_command(
    store: &mut FinanceStore,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            account,
            amount,
            income,
            category,
            date,
            description,
        } => {
            let account_id = resolve_account(store, &account)?;
            let amount = parse_amount(&amount)?;
            let kind = if income {
                TransactionType::Income
            } else {
                TransactionType::Expense
            };

            let mut new = NewTransaction::new(kind, account_id, amount)
                .with_category(resolve_optional_category(store, category.as_deref())?);
            if let Some(date) = date {
                new = new.with_date(parse_date(&date)?);
            }
            if let Some(description) = description {
                new = new.with_description(description);
            }

            let id = store.add_transaction(new)?;
            println!(
                "Recorded {} of {}: {}",
                kind.to_string().to_lowercase(),
                amount.format_with_symbol(symbol),
                id
            );
        }

        TransactionCommands::List {
            account,
            month,
            limit,
        } => {
            let account_id = account.map(|a| resolve_account(store, &a)).transpose()?;
            let month = month.map(|m| parse_month(store, Some(&m))).transpose()?;

            let rows: Vec<_> = store
                .transactions()
                .iter()
                .filter(|t| account_id.as_ref().map_or(true, |a| &t.account_id == a))
                .filter(|t| month.map_or(true, |m| m.contains(&t.date)))
                .take(limit)
                .collect();
            print!("{}", format_transaction_list(store, &rows, symbol));
        }

        TransactionCommands::Show { id } => {
            let id = resolve_transaction(store, &id)?;
            let txn = store
                .transaction(&id)
                .ok_or_else(|| FinanceError::transaction_not_found(id.as_str()))?;
            print!("{}", format_transaction_details(store, txn, symbol));
        }

        TransactionCommands::Edit {
            id,
            amount,
            kind,
            date,
            description,
            account,
            category,
            no_category,
        } => {
            let id = resolve_transaction(store, &id)?;

            let kind = kind
                .map(|k| {
                    TransactionType::parse(&k).ok_or_else(|| {
                        FinanceError::Validation(format!(
                            "Invalid transaction type: '{}'. Valid types: expense, income",
                            k
                        ))
                    })
                })
                .transpose()?;
            let category_id = if no_category {
                Some(None)
            } else {
                resolve_optional_category(store, category.as_deref())?.map(Some)
            };

            let patch = TransactionPatch {
                kind,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                description: description.map(Some),
                account_id: account.map(|a| resolve_account(store, &a)).transpose()?,
                category_id,
            };
            store.update_transaction(&id, patch)?;
            println!("Updated transaction: {}", id);
        }

        TransactionCommands::Delete { id } => {
            let id = resolve_transaction(store, &id)?;
            let is_transfer = store.transaction(&id).is_some_and(|t| t.is_transfer());
            if store.delete_transaction(&id) {
                if is_transfer {
                    println!("Deleted both legs of transfer: {}", id);
                } else {
                    println!("Deleted transaction: {}", id);
                }
            }
        }
    }

    Ok(())
}
