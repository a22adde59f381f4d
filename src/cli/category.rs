//! Category CLI commands

use clap::Subcommand;

use super::{parse_amount, resolve_category};
use crate::config::Settings;
use crate::display::category::{format_category_details, format_category_tree};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, CategoryPatch};
use crate::services::FinanceStore;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    #[command(alias = "create")]
    Add {
        /// Category name
        name: String,
        /// Display emoji
        #[arg(short, long)]
        emoji: Option<String>,
        /// Parent category name or ID
        #[arg(short, long)]
        parent: Option<String>,
        /// Monthly budget
        #[arg(short, long)]
        budget: Option<String>,
    },
    /// List categories as a tree
    List,
    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },
    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        emoji: Option<String>,
        /// New parent category
        #[arg(short, long, conflicts_with = "no_parent")]
        parent: Option<String>,
        /// Make this a top-level category
        #[arg(long)]
        no_parent: bool,
        /// New monthly budget
        #[arg(short, long, conflicts_with = "clear_budget")]
        budget: Option<String>,
        /// Remove the monthly budget
        #[arg(long)]
        clear_budget: bool,
    },
    /// Delete a category; transactions using it become uncategorized
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    store: &mut FinanceStore,
    settings: &Settings,
    cmd: CategoryCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        CategoryCommands::Add {
            name,
            emoji,
            parent,
            budget,
        } => {
            let mut category = Category::new(name);
            if let Some(emoji) = emoji {
                category = category.with_emoji(emoji);
            }
            if let Some(parent) = parent {
                category = category.with_parent(resolve_category(store, &parent)?);
            }
            if let Some(budget) = budget {
                category = category.with_budget(parse_amount(&budget)?);
            }

            let name = category.name.clone();
            let id = store.add_category(category)?;
            println!("Created category: {}", name);
            println!("  ID: {}", id);
        }

        CategoryCommands::List => {
            print!("{}", format_category_tree(store.categories(), symbol));
        }

        CategoryCommands::Show { category } => {
            let id = resolve_category(store, &category)?;
            let found = store
                .category(&id)
                .ok_or_else(|| FinanceError::category_not_found(&category))?;
            let parent = found.parent_id.as_ref().and_then(|p| store.category(p));
            print!("{}", format_category_details(found, parent, symbol));
        }

        CategoryCommands::Edit {
            category,
            name,
            emoji,
            parent,
            no_parent,
            budget,
            clear_budget,
        } => {
            let id = resolve_category(store, &category)?;

            let parent_id = if no_parent {
                Some(None)
            } else {
                match parent {
                    Some(p) => Some(Some(resolve_category(store, &p)?)),
                    None => None,
                }
            };
            if parent_id.as_ref().is_some_and(|p| p.as_ref() == Some(&id)) {
                return Err(FinanceError::Validation(
                    "A category cannot be its own parent".into(),
                ));
            }
            let budget_monthly = if clear_budget {
                Some(None)
            } else {
                budget.as_deref().map(parse_amount).transpose()?.map(Some)
            };

            let patch = CategoryPatch {
                name,
                emoji: emoji.map(Some),
                parent_id,
                budget_monthly,
            };
            store.update_category(&id, patch)?;
            println!("Updated category: {}", category);
        }

        CategoryCommands::Delete { category } => {
            let id = resolve_category(store, &category)?;
            if store.delete_category(&id) {
                println!("Deleted category: {}", category);
            }
        }
    }

    Ok(())
}
