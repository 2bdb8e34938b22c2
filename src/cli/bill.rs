//! Bill CLI commands

use clap::Subcommand;

use super::{date_or_today, parse_amount};
use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::display::{format_entry_list, format_year_groups, DisplayStyle};
use crate::error::BudgetResult;
use crate::services::BillService;
use crate::storage::Storage;

/// Bill subcommands
#[derive(Subcommand)]
pub enum BillCommands {
    /// Add a bill
    Add {
        name: String,
        amount: String,
        /// Due date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        due: Option<String>,
    },

    /// Mark a bill as paid
    Paid {
        id: String,
        #[arg(long)]
        undo: bool,
    },

    /// Delete a bill
    Delete { id: String },

    /// List bills grouped by year and month
    List {
        /// Only unpaid bills past their due date
        #[arg(long)]
        overdue: bool,
    },
}

/// Handle a bill command
pub fn handle_bill_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: BillCommands,
) -> BudgetResult<()> {
    let service = BillService::new(storage, clock);
    let style = DisplayStyle::from_settings(settings);

    match cmd {
        BillCommands::Add { name, amount, due } => {
            let amount = parse_amount(&amount)?;
            let due = date_or_today(due.as_deref(), clock)?;
            let bill = service.create(&name, amount, due)?;
            println!(
                "Added bill {} {} due {} ({})",
                bill.name,
                style.money(bill.amount),
                style.date(bill.due_date),
                bill.id
            );
        }

        BillCommands::Paid { id, undo } => {
            let bill = service.set_paid(&id, !undo)?;
            let state = if bill.paid { "paid" } else { "unpaid" };
            println!("Marked {} ({}) as {}", bill.name, bill.id, state);
        }

        BillCommands::Delete { id } => {
            let bill = service.delete(&id)?;
            println!("Deleted bill {} ({})", bill.name, bill.id);
        }

        BillCommands::List { overdue } => {
            if overdue {
                print!("{}", format_entry_list(&service.overdue()?, &style, "No overdue bills."));
            } else {
                print!(
                    "{}",
                    format_year_groups(&service.list_grouped()?, &style, "No bills recorded.")
                );
            }
        }
    }

    Ok(())
}
