use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use payperiod::cli::{
    handle_audit_command, handle_bill_command, handle_expense_command, handle_export_command,
    handle_income_command, handle_paycheck_command,
};
use payperiod::clock::SystemClock;
use payperiod::config::{paths::PayPaths, settings::Settings};
use payperiod::logging::init_tracing;
use payperiod::storage::Storage;

#[derive(Parser)]
#[command(
    name = "payperiod",
    version,
    about = "Paycheck-to-paycheck budgeting from the command line",
    long_about = "payperiod tracks recurring expenses, income, bills and paychecks, \
                  and shows what is left of each paycheck once everything due \
                  before the next one is paid."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(payperiod::cli::ExpenseCommands),

    /// Income management commands
    #[command(subcommand)]
    Income(payperiod::cli::IncomeCommands),

    /// Bill management commands
    #[command(subcommand)]
    Bill(payperiod::cli::BillCommands),

    /// Paycheck management commands
    #[command(subcommand)]
    Paycheck(payperiod::cli::PaycheckCommands),

    /// Export a grouped listing as CSV, JSON or YAML
    Export(payperiod::cli::ExportArgs),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory and settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = PayPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter);
    debug!(base_dir = %paths.base_dir().display(), "resolved paths");

    // Initialize storage
    let storage = Storage::open(paths.clone())?;
    let clock = SystemClock;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, &clock, cmd)?;
        }
        Some(Commands::Income(cmd)) => {
            handle_income_command(&storage, &settings, &clock, cmd)?;
        }
        Some(Commands::Bill(cmd)) => {
            handle_bill_command(&storage, &settings, &clock, cmd)?;
        }
        Some(Commands::Paycheck(cmd)) => {
            handle_paycheck_command(&storage, &settings, &clock, cmd)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, &settings, &clock, args)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&storage, limit)?;
        }
        Some(Commands::Init) => {
            println!("Initializing payperiod at: {}", paths.base_dir().display());
            storage.save_all()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  payperiod income add-recurring salary 2500 -f semi-monthly -s 2025-01-01 -e 2025-12-31");
            println!("  payperiod expense add-recurring Rent 1200 -f monthly -s 2025-01-01 -e 2025-12-31");
            println!("  payperiod income report");
        }
        Some(Commands::Config) => {
            println!("payperiod Configuration");
            println!("=======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:         {}", settings.currency_symbol);
            println!("  Date format:             {}", settings.date_format);
            println!("  Salary source:           {}", settings.salary_source);
            println!("  Max generated instances: {}", settings.max_generated_instances);
            println!("  Log filter:              {}", settings.log_filter);
        }
        None => {
            println!("payperiod - paycheck-to-paycheck budgeting");
            println!();
            println!("Run 'payperiod --help' for usage information.");
        }
    }

    Ok(())
}
