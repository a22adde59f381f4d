//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use super::{parse_amount, resolve_account};
use crate::config::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Account, AccountPatch, AccountType};
use crate::services::FinanceStore;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    #[command(alias = "create")]
    Add {
        /// Account name
        name: String,
        /// Account type (cash, bank, savings)
        #[arg(short = 't', long, default_value = "bank")]
        account_type: String,
        /// Savings target
        #[arg(long)]
        target: Option<String>,
    },
    /// List all accounts with balances
    List,
    /// Show account details
    Show {
        /// Account name or ID
        account: String,
    },
    /// Edit an account
    Edit {
        /// Account name or ID
        account: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New account type
        #[arg(short = 't', long)]
        account_type: Option<String>,
        /// New savings target
        #[arg(long, conflicts_with = "clear_target")]
        target: Option<String>,
        /// Remove the savings target
        #[arg(long)]
        clear_target: bool,
    },
    /// Delete an account and all of its transactions
    Delete {
        /// Account name or ID
        account: String,
    },
}

fn parse_account_type(input: &str) -> FinanceResult<AccountType> {
    AccountType::parse(input).ok_or_else(|| {
        FinanceError::Validation(format!(
            "Invalid account type: '{}'. Valid types: cash, bank, savings",
            input
        ))
    })
}

/// Handle an account command
pub fn handle_account_command(
    store: &mut FinanceStore,
    settings: &Settings,
    cmd: AccountCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        AccountCommands::Add {
            name,
            account_type,
            target,
        } => {
            let mut account = Account::new(name, parse_account_type(&account_type)?);
            if let Some(target) = target {
                account = account.with_target_amount(parse_amount(&target)?);
            }

            let id = store.add_account(account)?;
            let created = store
                .account(&id)
                .ok_or_else(|| FinanceError::account_not_found(id.as_str()))?;
            println!("Created account: {}", created.name);
            println!("  Type: {}", created.account_type);
            println!("  ID: {}", created.id);
        }

        AccountCommands::List => {
            print!("{}", format_account_list(&store.account_summaries(), symbol));
        }

        AccountCommands::Show { account } => {
            let id = resolve_account(store, &account)?;
            let summary = store
                .account_summaries()
                .into_iter()
                .find(|s| s.account.id == id)
                .ok_or_else(|| FinanceError::account_not_found(&account))?;
            print!("{}", format_account_details(&summary, symbol));
        }

        AccountCommands::Edit {
            account,
            name,
            account_type,
            target,
            clear_target,
        } => {
            let id = resolve_account(store, &account)?;

            let target_amount = if clear_target {
                Some(None)
            } else {
                target.as_deref().map(parse_amount).transpose()?.map(Some)
            };
            let patch = AccountPatch {
                name,
                account_type: account_type.as_deref().map(parse_account_type).transpose()?,
                target_amount,
            };

            if patch.name.is_none() && patch.account_type.is_none() && patch.target_amount.is_none() {
                println!("No changes specified. Use --name, --type or --target.");
                return Ok(());
            }

            store.update_account(&id, patch)?;
            if let Some(updated) = store.account(&id) {
                println!("Updated account: {}", updated);
            }
        }

        AccountCommands::Delete { account } => {
            let id = resolve_account(store, &account)?;
            let name = store.account(&id).map(|a| a.name.clone()).unwrap_or_default();
            if store.delete_account(&id) {
                println!("Deleted account: {}", name);
            }
        }
    }

    Ok(())
}
