use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use finance_tracker::cli::{
    handle_account_command, handle_backup_command, handle_category_command, handle_config_command,
    handle_credit_command, handle_export, handle_goal_command, handle_import,
    handle_macro_command, handle_recurring_command, handle_report_command, handle_reset,
    handle_summary, handle_transaction_command, handle_transfer,
};
use finance_tracker::config::{FinancePaths, Settings};
use finance_tracker::export::ExportFormat;
use finance_tracker::logging::init_tracing;
use finance_tracker::services::FinanceStore;
use finance_tracker::storage::Repository;

#[derive(Parser)]
#[command(
    name = "finance",
    version,
    about = "Personal finance tracker for the terminal",
    long_about = "Track accounts, expenses and income, one-tap expense macros, \
                  recurring payments, credits and savings goals, and see how \
                  much is safe to spend this month."
)]
struct Cli {
    /// Log more detail to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Balances, obligations and what is safe to spend
    Summary,

    /// Account management commands
    #[command(subcommand)]
    Account(finance_tracker::cli::AccountCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(finance_tracker::cli::CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(finance_tracker::cli::TransactionCommands),

    /// Move money between accounts
    Transfer(finance_tracker::cli::TransferArgs),

    /// One-tap expense templates
    #[command(subcommand)]
    Macro(finance_tracker::cli::MacroCommands),

    /// Monthly recurring payments
    #[command(subcommand)]
    Recurring(finance_tracker::cli::RecurringCommands),

    /// Credits repaid in installments
    #[command(subcommand)]
    Credit(finance_tracker::cli::CreditCommands),

    /// Savings goals
    #[command(subcommand)]
    Goal(finance_tracker::cli::GoalCommands),

    /// Spending, cash flow and budget reports
    #[command(subcommand)]
    Report(finance_tracker::cli::ReportCommands),

    /// Export all data (stdout when no file is given)
    Export {
        /// Output file; the format is taken from its extension
        output: Option<PathBuf>,
        /// Output format (json, yaml, csv)
        #[arg(short, long)]
        format: Option<ExportFormat>,
        /// With csv: export accounts instead of transactions
        #[arg(long)]
        accounts: bool,
    },

    /// Replace all data with a JSON or YAML export
    Import {
        file: PathBuf,
    },

    /// Backup management commands
    #[command(subcommand)]
    Backup(finance_tracker::cli::BackupCommands),

    /// Delete everything and start from the defaults
    Reset {
        /// Skip the confirmation notice
        #[arg(long)]
        force: bool,
    },

    /// Show or change settings
    #[command(subcommand)]
    Config(finance_tracker::cli::ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = FinancePaths::new()?;
    paths.ensure_directories()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let repository = Repository::json_file(paths.data_dir())?;
    let mut store = FinanceStore::open(repository)
        .with_context(|| format!("Failed to load {}", paths.store_file().display()))?;

    match cli.command {
        None | Some(Commands::Summary) => handle_summary(&store, &settings)?,
        Some(Commands::Account(cmd)) => handle_account_command(&mut store, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&mut store, &settings, cmd)?,
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&mut store, &settings, cmd)?
        }
        Some(Commands::Transfer(args)) => handle_transfer(&mut store, &settings, args)?,
        Some(Commands::Macro(cmd)) => handle_macro_command(&mut store, &settings, cmd)?,
        Some(Commands::Recurring(cmd)) => handle_recurring_command(&mut store, &settings, cmd)?,
        Some(Commands::Credit(cmd)) => handle_credit_command(&mut store, &settings, cmd)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&mut store, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&store, &settings, cmd)?,
        Some(Commands::Export {
            output,
            format,
            accounts,
        }) => handle_export(&store, output, format, accounts)?,
        Some(Commands::Import { file }) => handle_import(&mut store, &paths, &settings, &file)?,
        Some(Commands::Backup(cmd)) => handle_backup_command(&mut store, &paths, &settings, cmd)?,
        Some(Commands::Reset { force }) => handle_reset(&mut store, &paths, &settings, force)?,
        Some(Commands::Config(cmd)) => handle_config_command(&paths, &mut settings, cmd)?,
    }

    Ok(())
}
