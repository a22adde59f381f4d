//! Credit CLI commands

use clap::Subcommand;

use super::{lookup, parse_amount, resolve_account};
use crate::config::Settings;
use crate::display::planning::format_credit_list;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Credit, CreditId, CreditPatch};
use crate::services::FinanceStore;

/// Credit subcommands
#[derive(Subcommand)]
pub enum CreditCommands {
    /// Add a credit repaid in monthly installments
    Add {
        name: String,
        /// Total amount owed
        total: String,
        /// Monthly installment
        installment: String,
        /// Day of the month the installment is due (1-31)
        #[arg(short = 'D', long, default_value = "1")]
        due_day: u8,
        /// Account installments are paid from
        #[arg(short, long)]
        account: String,
        /// Amount already repaid
        #[arg(long)]
        paid: Option<String>,
    },
    /// List credits
    List,
    /// Edit a credit
    Edit {
        /// Name or ID
        credit: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        total: Option<String>,
        #[arg(long)]
        paid: Option<String>,
        #[arg(long)]
        installment: Option<String>,
        #[arg(short = 'D', long)]
        due_day: Option<u8>,
        #[arg(short, long)]
        account: Option<String>,
    },
    /// Delete a credit; past payments are kept
    Delete {
        credit: String,
    },
    /// Pay this month's installment
    Pay {
        credit: String,
    },
}

fn resolve_credit(store: &FinanceStore, query: &str) -> FinanceResult<CreditId> {
    lookup(store.credits(), query, |c| c.id.as_str(), |c| &c.name)
        .map(|c| c.id.clone())
        .ok_or_else(|| FinanceError::credit_not_found(query))
}

/// Handle a credit command
pub fn handle_credit_command(
    store: &mut FinanceStore,
    settings: &Settings,
    cmd: CreditCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        CreditCommands::Add {
            name,
            total,
            installment,
            due_day,
            account,
            paid,
        } => {
            let mut credit = Credit::new(
                name.clone(),
                parse_amount(&total)?,
                parse_amount(&installment)?,
                due_day,
                resolve_account(store, &account)?,
            );
            if let Some(paid) = paid {
                credit = credit.with_paid(parse_amount(&paid)?);
            }

            let id = store.add_credit(credit)?;
            println!("Added credit: {} ({})", name, id);
        }

        CreditCommands::List => {
            print!("{}", format_credit_list(store, symbol));
        }

        CreditCommands::Edit {
            credit,
            name,
            total,
            paid,
            installment,
            due_day,
            account,
        } => {
            let id = resolve_credit(store, &credit)?;
            let patch = CreditPatch {
                name,
                total: total.as_deref().map(parse_amount).transpose()?,
                paid: paid.as_deref().map(parse_amount).transpose()?,
                monthly_installment: installment.as_deref().map(parse_amount).transpose()?,
                due_day,
                account_id: account.map(|a| resolve_account(store, &a)).transpose()?,
            };
            store.update_credit(&id, patch)?;
            println!("Updated credit: {}", credit);
        }

        CreditCommands::Delete { credit } => {
            let id = resolve_credit(store, &credit)?;
            if store.delete_credit(&id) {
                println!("Deleted credit: {}", credit);
            }
        }

        CreditCommands::Pay { credit } => {
            let id = resolve_credit(store, &credit)?;
            match store.pay_credit_installment(&id) {
                Some(txn_id) => {
                    println!("Paid installment on {}: {}", credit, txn_id);
                    if let Some(c) = store.credit(&id) {
                        println!(
                            "  Remaining: {} ({} installments)",
                            c.remaining().format_with_symbol(symbol),
                            c.installments_remaining()
                        );
                    }
                }
                None => println!("{} is already paid for {}", credit, store.current_month()),
            }
        }
    }

    Ok(())
}
