//! Macro CLI commands
//!
//! A macro is addressed by its group and its own name or ID.

use clap::Subcommand;

use super::{lookup, parse_amount, resolve_account, resolve_optional_category};
use crate::config::Settings;
use crate::display::planning::format_macro_groups;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Macro, MacroGroup, MacroGroupId, MacroId, MacroPatch};
use crate::services::FinanceStore;

/// Macro subcommands
#[derive(Subcommand)]
pub enum MacroCommands {
    /// Create a macro group
    AddGroup {
        name: String,
    },
    /// Delete a group and every macro in it
    DeleteGroup {
        /// Group name or ID
        group: String,
    },
    /// Add a macro to a group
    Add {
        /// Group name or ID
        group: String,
        /// Macro name, also used as the transaction description
        name: String,
        /// Default amount
        amount: String,
        /// Account the expense is drawn from
        #[arg(short, long)]
        account: String,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        emoji: Option<String>,
    },
    /// Edit a macro
    Edit {
        group: String,
        /// Macro name or ID
        name: String,
        #[arg(long)]
        rename: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(short, long)]
        account: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        emoji: Option<String>,
    },
    /// Hide a macro; it can be restored later
    Delete {
        group: String,
        name: String,
    },
    /// Bring back a deleted macro
    Restore {
        group: String,
        name: String,
    },
    /// List macro groups
    List {
        /// Include deleted macros
        #[arg(short, long)]
        all: bool,
        /// Only deleted macros
        #[arg(long, conflicts_with = "all")]
        deleted: bool,
    },
    /// Record the macro's expense
    #[command(alias = "trigger")]
    Run {
        group: String,
        name: String,
        /// Use this amount instead of the macro's default
        #[arg(long)]
        amount: Option<String>,
    },
}

fn resolve_group(store: &FinanceStore, query: &str) -> FinanceResult<MacroGroupId> {
    lookup(store.macro_groups(), query, |g| g.id.as_str(), |g| &g.name)
        .map(|g| g.id.clone())
        .ok_or_else(|| FinanceError::NotFound {
            entity_type: "Macro group",
            identifier: query.to_string(),
        })
}

fn resolve_macro(
    store: &FinanceStore,
    group: &str,
    query: &str,
) -> FinanceResult<(MacroGroupId, MacroId)> {
    let group_id = resolve_group(store, group)?;
    let macros = store
        .macro_group(&group_id)
        .map(|g| g.macros.as_slice())
        .unwrap_or_default();
    let macro_id = lookup(macros, query, |m| m.id.as_str(), |m| &m.name)
        .map(|m| m.id.clone())
        .ok_or_else(|| FinanceError::macro_not_found(query))?;
    Ok((group_id, macro_id))
}

/// Handle a macro command
pub fn handle_macro_command(
    store: &mut FinanceStore,
    settings: &Settings,
    cmd: MacroCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        MacroCommands::AddGroup { name } => {
            let id = store.add_macro_group(MacroGroup::new(name.clone()))?;
            println!("Created macro group: {} ({})", name, id);
        }

        MacroCommands::DeleteGroup { group } => {
            let id = resolve_group(store, &group)?;
            if store.delete_macro_group(&id) {
                println!("Deleted macro group: {}", group);
            }
        }

        MacroCommands::Add {
            group,
            name,
            amount,
            account,
            category,
            emoji,
        } => {
            let group_id = resolve_group(store, &group)?;
            let mut m = Macro::new(name.clone(), parse_amount(&amount)?, resolve_account(store, &account)?);
            if let Some(category_id) = resolve_optional_category(store, category.as_deref())? {
                m = m.with_category(category_id);
            }
            if let Some(emoji) = emoji {
                m = m.with_emoji(emoji);
            }

            match store.add_macro_to_group(&group_id, m)? {
                Some(id) => println!("Added macro: {} ({})", name, id),
                None => return Err(FinanceError::NotFound {
                    entity_type: "Macro group",
                    identifier: group,
                }),
            }
        }

        MacroCommands::Edit {
            group,
            name,
            rename,
            amount,
            account,
            category,
            emoji,
        } => {
            let (group_id, macro_id) = resolve_macro(store, &group, &name)?;
            let patch = MacroPatch {
                name: rename,
                emoji: emoji.map(Some),
                amount: amount.as_deref().map(parse_amount).transpose()?,
                category_id: resolve_optional_category(store, category.as_deref())?.map(Some),
                account_id: account.map(|a| resolve_account(store, &a)).transpose()?,
            };
            store.update_macro_in_group(&group_id, &macro_id, patch)?;
            println!("Updated macro: {}", name);
        }

        MacroCommands::Delete { group, name } => {
            let (group_id, macro_id) = resolve_macro(store, &group, &name)?;
            if store.delete_macro_from_group(&group_id, &macro_id) {
                println!("Deleted macro: {} (restore with 'finance macro restore')", name);
            }
        }

        MacroCommands::Restore { group, name } => {
            let (group_id, macro_id) = resolve_macro(store, &group, &name)?;
            if store.restore_macro_in_group(&group_id, &macro_id) {
                println!("Restored macro: {}", name);
            }
        }

        MacroCommands::List { all, deleted } => {
            if deleted {
                let hidden = store.deleted_macros();
                if hidden.is_empty() {
                    println!("No deleted macros.");
                }
                for (group, m) in hidden {
                    println!("{} / {}  {}", group.name, m.name, m.amount.format_with_symbol(symbol));
                }
            } else {
                print!("{}", format_macro_groups(store, all, symbol));
            }
        }

        MacroCommands::Run {
            group,
            name,
            amount,
        } => {
            let (group_id, macro_id) = resolve_macro(store, &group, &name)?;
            let override_amount = amount.as_deref().map(parse_amount).transpose()?;
            match store.trigger_macro(&macro_id, &group_id, override_amount)? {
                Some(id) => println!("Recorded {}: {}", name, id),
                None => return Err(FinanceError::macro_not_found(name)),
            }
        }
    }

    Ok(())
}
