//! Savings goal CLI commands

use clap::Subcommand;

use super::{lookup, parse_amount};
use crate::config::Settings;
use crate::display::planning::format_goal_list;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Goal, GoalId, GoalPatch};
use crate::services::FinanceStore;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Add a savings goal
    Add {
        name: String,
        /// Target amount
        target: String,
        /// Amount already saved
        #[arg(long)]
        saved: Option<String>,
    },
    /// List goals with progress
    List,
    /// Edit a goal
    Edit {
        /// Name or ID
        goal: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        target: Option<String>,
        #[arg(long)]
        saved: Option<String>,
    },
    /// Delete a goal
    Delete {
        goal: String,
    },
    /// Put money toward a goal
    Deposit {
        goal: String,
        amount: String,
    },
    /// Take money out of a goal
    Withdraw {
        goal: String,
        amount: String,
    },
}

fn resolve_goal(store: &FinanceStore, query: &str) -> FinanceResult<GoalId> {
    lookup(store.goals(), query, |g| g.id.as_str(), |g| &g.name)
        .map(|g| g.id.clone())
        .ok_or_else(|| FinanceError::goal_not_found(query))
}

fn print_progress(store: &FinanceStore, id: &GoalId, symbol: &str) {
    if let Some(goal) = store.goal(id) {
        println!(
            "{}: {} of {}{}",
            goal.name,
            goal.saved_amount.format_with_symbol(symbol),
            goal.target_amount.format_with_symbol(symbol),
            if goal.is_reached() { " (reached!)" } else { "" }
        );
    }
}

/// Handle a goal command
pub fn handle_goal_command(
    store: &mut FinanceStore,
    settings: &Settings,
    cmd: GoalCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        GoalCommands::Add {
            name,
            target,
            saved,
        } => {
            let mut goal = Goal::new(name, parse_amount(&target)?);
            if let Some(saved) = saved {
                goal = goal.with_saved(parse_amount(&saved)?);
            }
            let id = store.add_goal(goal)?;
            print_progress(store, &id, symbol);
        }

        GoalCommands::List => {
            print!("{}", format_goal_list(store, symbol));
        }

        GoalCommands::Edit {
            goal,
            name,
            target,
            saved,
        } => {
            let id = resolve_goal(store, &goal)?;
            let patch = GoalPatch {
                name,
                target_amount: target.as_deref().map(parse_amount).transpose()?,
                saved_amount: saved.as_deref().map(parse_amount).transpose()?,
            };
            store.update_goal(&id, patch)?;
            print_progress(store, &id, symbol);
        }

        GoalCommands::Delete { goal } => {
            let id = resolve_goal(store, &goal)?;
            if store.delete_goal(&id) {
                println!("Deleted goal: {}", goal);
            }
        }

        GoalCommands::Deposit { goal, amount } => {
            let id = resolve_goal(store, &goal)?;
            store.add_to_goal(&id, parse_amount(&amount)?)?;
            print_progress(store, &id, symbol);
        }

        GoalCommands::Withdraw { goal, amount } => {
            let id = resolve_goal(store, &goal)?;
            store.remove_from_goal(&id, parse_amount(&amount)?)?;
            print_progress(store, &id, symbol);
        }
    }

    Ok(())
}
