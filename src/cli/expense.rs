//! Expense CLI commands
//!
//! One-time expenses, recurring definitions and their generated instances.

use clap::Subcommand;

use super::{
    date_or_today, parse_amount, parse_frequency, parse_optional_amount, parse_optional_date,
    parse_optional_frequency,
};
use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::display::{format_entry_list, format_recurring_expenses, format_year_groups, DisplayStyle};
use crate::error::BudgetResult;
use crate::recurrence::parse_boundary_date;
use crate::services::{ExpenseService, InstanceChanges, RecurringChanges, RecurringDraft};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a one-time expense
    Add {
        /// Expense name
        name: String,
        /// Amount (e.g., "42.50")
        amount: String,
        /// Due date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Create a recurring expense and generate its occurrences
    AddRecurring {
        /// Expense name
        name: String,
        /// Amount per occurrence
        amount: String,
        /// daily, weekly, monthly or yearly
        #[arg(short, long)]
        frequency: String,
        /// First occurrence (YYYY-MM-DD or RFC 3339)
        #[arg(short, long)]
        start: String,
        /// Last possible occurrence
        #[arg(short, long)]
        end: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Change a recurring definition and regenerate occurrences from today
    UpdateRecurring {
        /// Definition ID (prefix accepted)
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        frequency: Option<String>,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long)]
        end: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Delete a recurring definition and all of its occurrences
    DeleteRecurring {
        /// Definition ID (prefix accepted)
        id: String,
    },

    /// Edit a single occurrence
    Edit {
        /// Expense ID (prefix accepted)
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Mark an expense as paid
    Paid {
        /// Expense ID (prefix accepted)
        id: String,
        /// Mark as unpaid instead
        #[arg(long)]
        undo: bool,
    },

    /// Delete a single expense
    Delete {
        /// Expense ID (prefix accepted)
        id: String,
    },

    /// List expenses grouped by year and month
    List {
        /// List recurring definitions instead of instances
        #[arg(short, long)]
        recurring: bool,
        /// Only expenses due on or after this date
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Only expenses due on or before this date
        #[arg(long, requires = "from")]
        to: Option<String>,
    },

    /// List unpaid expenses that are past due
    Overdue,
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: ExpenseCommands,
) -> BudgetResult<()> {
    let service = ExpenseService::new(storage, clock).with_settings(settings);
    let style = DisplayStyle::from_settings(settings);

    match cmd {
        ExpenseCommands::Add {
            name,
            amount,
            date,
            description,
        } => {
            let amount = parse_amount(&amount)?;
            let due = date_or_today(date.as_deref(), clock)?;
            let expense = service.create_one_time(
                &name,
                description.as_deref().unwrap_or_default(),
                amount,
                due,
            )?;
            println!(
                "Added expense {} {} due {} ({})",
                expense.name,
                style.money(expense.amount),
                style.date(expense.due_date),
                expense.id
            );
        }

        ExpenseCommands::AddRecurring {
            name,
            amount,
            frequency,
            start,
            end,
            description,
        } => {
            let draft = RecurringDraft::new(
                name,
                parse_amount(&amount)?,
                parse_frequency(&frequency)?,
                parse_boundary_date(&start)?,
                parse_optional_date(end.as_deref())?,
            )
            .with_description(description.unwrap_or_default());

            let outcome = service.create_recurring(draft)?;
            println!(
                "Created recurring expense {} ({}): {}",
                outcome.definition.name,
                outcome.definition.id,
                outcome.definition.rule.describe()
            );
            println!("Generated {} occurrences", outcome.generated.len());
        }

        ExpenseCommands::UpdateRecurring {
            id,
            name,
            amount,
            frequency,
            start,
            end,
            description,
        } => {
            let changes = RecurringChanges {
                name,
                description,
                amount: parse_optional_amount(amount.as_deref())?,
                frequency: parse_optional_frequency(frequency.as_deref())?,
                start_date: parse_optional_date(start.as_deref())?,
                end_date: parse_optional_date(end.as_deref())?,
            };
            if changes.is_empty() {
                println!("Nothing to update.");
                return Ok(());
            }

            let outcome = service.update_recurring(&id, changes)?;
            println!(
                "Updated recurring expense {} ({}): {}",
                outcome.definition.name,
                outcome.definition.id,
                outcome.definition.rule.describe()
            );
            println!(
                "Replaced {} upcoming occurrences with {}",
                outcome.replaced,
                outcome.generated.len()
            );
        }

        ExpenseCommands::DeleteRecurring { id } => {
            let (definition, removed) = service.delete_recurring(&id)?;
            println!(
                "Deleted recurring expense {} and {} occurrences",
                definition.name, removed
            );
        }

        ExpenseCommands::Edit {
            id,
            name,
            amount,
            date,
            description,
        } => {
            let changes = InstanceChanges {
                name,
                description,
                amount: parse_optional_amount(amount.as_deref())?,
                date: parse_optional_date(date.as_deref())?,
            };
            if changes.is_empty() {
                println!("Nothing to update.");
                return Ok(());
            }

            let expense = service.update_instance(&id, changes)?;
            println!(
                "Updated expense {} {} due {}",
                expense.name,
                style.money(expense.amount),
                style.date(expense.due_date)
            );
        }

        ExpenseCommands::Paid { id, undo } => {
            let expense = service.set_paid(&id, !undo)?;
            let state = if expense.paid { "paid" } else { "unpaid" };
            println!("Marked {} ({}) as {}", expense.name, expense.id, state);
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.delete(&id)?;
            println!("Deleted expense {} ({})", expense.name, expense.id);
        }

        ExpenseCommands::List {
            recurring,
            from,
            to,
        } => {
            if recurring {
                print!("{}", format_recurring_expenses(&service.list_recurring()?, &style));
            } else if let (Some(from), Some(to)) = (from, to) {
                let expenses = service.list_range(parse_boundary_date(&from)?, parse_boundary_date(&to)?)?;
                print!("{}", format_entry_list(&expenses, &style, "No expenses in range."));
            } else {
                print!(
                    "{}",
                    format_year_groups(&service.list_grouped()?, &style, "No expenses recorded.")
                );
            }
        }

        ExpenseCommands::Overdue => {
            print!(
                "{}",
                format_entry_list(&service.overdue()?, &style, "No overdue expenses.")
            );
        }
    }

    Ok(())
}
