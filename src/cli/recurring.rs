//! Recurring payment CLI commands

use clap::Subcommand;

use super::{lookup, parse_amount, resolve_account, resolve_optional_category};
use crate::config::Settings;
use crate::display::planning::format_recurring_list;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Recurring, RecurringId, RecurringPatch};
use crate::services::FinanceStore;

/// Recurring payment subcommands
#[derive(Subcommand)]
pub enum RecurringCommands {
    /// Add a monthly recurring payment
    Add {
        name: String,
        amount: String,
        /// Day of the month the payment is due (1-31)
        #[arg(short = 'D', long, default_value = "1")]
        due_day: u8,
        /// Account the payment is drawn from
        #[arg(short, long)]
        account: String,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List recurring payments with this month's status
    List,
    /// Edit a recurring payment
    Edit {
        /// Name or ID
        recurring: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(short = 'D', long)]
        due_day: Option<u8>,
        #[arg(short, long)]
        account: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a recurring payment; past payments are kept
    Delete {
        recurring: String,
    },
    /// Record this month's payment as an expense
    Pay {
        recurring: String,
    },
    /// Mark this month as paid or unpaid without recording an expense
    Mark {
        recurring: String,
        /// Clear the paid flag instead
        #[arg(long)]
        unpaid: bool,
    },
}

fn resolve_recurring(store: &FinanceStore, query: &str) -> FinanceResult<RecurringId> {
    lookup(store.recurrings(), query, |r| r.id.as_str(), |r| &r.name)
        .map(|r| r.id.clone())
        .ok_or_else(|| FinanceError::recurring_not_found(query))
}

/// Handle a recurring payment command
pub fn handle_recurring_command(
    store: &mut FinanceStore,
    settings: &Settings,
    cmd: RecurringCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        RecurringCommands::Add {
            name,
            amount,
            due_day,
            account,
            category,
        } => {
            let amount = parse_amount(&amount)?;
            let mut recurring = Recurring::new(name.clone(), amount, due_day, resolve_account(store, &account)?);
            if let Some(category_id) = resolve_optional_category(store, category.as_deref())? {
                recurring = recurring.with_category(category_id);
            }

            let id = store.add_recurring(recurring)?;
            println!(
                "Added recurring payment: {} ({} on day {}) {}",
                name,
                amount.format_with_symbol(symbol),
                due_day,
                id
            );
        }

        RecurringCommands::List => {
            print!("{}", format_recurring_list(store, symbol));
        }

        RecurringCommands::Edit {
            recurring,
            name,
            amount,
            due_day,
            account,
            category,
        } => {
            let id = resolve_recurring(store, &recurring)?;
            let patch = RecurringPatch {
                name,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                due_day,
                account_id: account.map(|a| resolve_account(store, &a)).transpose()?,
                category_id: resolve_optional_category(store, category.as_deref())?.map(Some),
            };
            store.update_recurring(&id, patch)?;
            println!("Updated recurring payment: {}", recurring);
        }

        RecurringCommands::Delete { recurring } => {
            let id = resolve_recurring(store, &recurring)?;
            if store.delete_recurring(&id) {
                println!("Deleted recurring payment: {}", recurring);
            }
        }

        RecurringCommands::Pay { recurring } => {
            let id = resolve_recurring(store, &recurring)?;
            match store.pay_recurring(&id) {
                Some(txn_id) => println!("Paid {} for {}: {}", recurring, store.current_month(), txn_id),
                None => println!("{} is already paid for {}", recurring, store.current_month()),
            }
        }

        RecurringCommands::Mark { recurring, unpaid } => {
            let id = resolve_recurring(store, &recurring)?;
            store.toggle_recurring_paid(&id, !unpaid);
            let state = if store.is_recurring_paid(&id) { "paid" } else { "unpaid" };
            println!("{} is now {} for {}", recurring, state, store.current_month());
        }
    }

    Ok(())
}
