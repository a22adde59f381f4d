//! Transfer CLI command

use clap::Args;

use super::{parse_amount, parse_date, resolve_account, resolve_optional_category};
use crate::config::Settings;
use crate::error::FinanceResult;
use crate::services::FinanceStore;

/// Arguments for `finance transfer`
#[derive(Args)]
pub struct TransferArgs {
    /// Source account name or ID
    pub from: String,
    /// Destination account name or ID
    pub to: String,
    /// Amount to move
    pub amount: String,
    /// Transfer date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,
    /// Description for both legs (default: "Transfer")
    #[arg(long)]
    pub description: Option<String>,
    /// Category name or ID for both legs
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Move money between two accounts
pub fn handle_transfer(
    store: &mut FinanceStore,
    settings: &Settings,
    args: TransferArgs,
) -> FinanceResult<()> {
    let from = resolve_account(store, &args.from)?;
    let to = resolve_account(store, &args.to)?;
    let amount = parse_amount(&args.amount)?;
    let date = args.date.as_deref().map(parse_date).transpose()?;
    let category_id = resolve_optional_category(store, args.category.as_deref())?;

    let receipt = store.create_transfer(&from, &to, amount, date, args.description, category_id)?;

    println!(
        "Transferred {} from {} to {}",
        amount.format_with_symbol(&settings.currency_symbol),
        args.from,
        args.to
    );
    println!("  Transfer ID: {}", receipt.transfer_id);
    Ok(())
}
