//! Income CLI commands
//!
//! Implements CLI commands for one-time and recurring income, and the
//! salary-period report that sets income against expenses.

use clap::Subcommand;

use super::{
    date_or_today, parse_amount, parse_frequency, parse_optional_amount, parse_optional_date,
    parse_optional_frequency,
};
use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::display::{format_periods, format_recurring_incomes, format_year_groups, DisplayStyle};
use crate::error::BudgetResult;
use crate::recurrence::parse_boundary_date;
use crate::services::{IncomeService, RecurringChanges, RecurringDraft};
use crate::storage::Storage;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record one-time income
    Add {
        /// Income source (e.g., "salary")
        source: String,
        /// Amount (e.g., "2500" or "2500.00")
        amount: String,
        /// Date received (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Create recurring income and generate its occurrences
    AddRecurring {
        source: String,
        amount: String,
        /// daily, weekly, bi-weekly, monthly, semi-monthly or yearly
        #[arg(short, long)]
        frequency: String,
        #[arg(short, long)]
        start: String,
        #[arg(short, long)]
        end: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Change recurring income and regenerate occurrences from today
    UpdateRecurring {
        /// Definition ID (prefix accepted)
        id: String,
        #[arg(long)]
        source: Option<String>,
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

    /// Delete recurring income and all of its occurrences
    DeleteRecurring { id: String },

    /// Mark income as received
    Received {
        id: String,
        /// Mark as not received instead
        #[arg(long)]
        undo: bool,
    },

    /// Delete a single income entry
    Delete { id: String },

    /// List income grouped by year and month
    List {
        /// List recurring definitions instead of instances
        #[arg(short, long)]
        recurring: bool,
    },

    /// Show each salary period with the expenses due in it
    Report,
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: IncomeCommands,
) -> BudgetResult<()> {
    let service = IncomeService::new(storage, clock).with_settings(settings);
    let style = DisplayStyle::from_settings(settings);

    match cmd {
        IncomeCommands::Add {
            source,
            amount,
            date,
            description,
        } => {
            let amount = parse_amount(&amount)?;
            let received = date_or_today(date.as_deref(), clock)?;
            let income = service.create_one_time(
                &source,
                description.as_deref().unwrap_or_default(),
                amount,
                received,
            )?;
            println!(
                "Added income {} {} on {} ({})",
                income.source,
                style.money(income.amount),
                style.date(income.received_date),
                income.id
            );
        }

        IncomeCommands::AddRecurring {
            source,
            amount,
            frequency,
            start,
            end,
            description,
        } => {
            let draft = RecurringDraft::new(
                source,
                parse_amount(&amount)?,
                parse_frequency(&frequency)?,
                parse_boundary_date(&start)?,
                parse_optional_date(end.as_deref())?,
            )
            .with_description(description.unwrap_or_default());

            let outcome = service.create_recurring(draft)?;
            println!(
                "Created recurring income {} ({}): {}",
                outcome.definition.source,
                outcome.definition.id,
                outcome.definition.rule.describe()
            );
            println!("Generated {} occurrences", outcome.generated.len());
        }

        IncomeCommands::UpdateRecurring {
            id,
            source,
            amount,
            frequency,
            start,
            end,
            description,
        } => {
            let changes = RecurringChanges {
                name: source,
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
                "Updated recurring income {} ({}): {}",
                outcome.definition.source,
                outcome.definition.id,
                outcome.definition.rule.describe()
            );
            println!(
                "Replaced {} upcoming occurrences with {}",
                outcome.replaced,
                outcome.generated.len()
            );
        }

        IncomeCommands::DeleteRecurring { id } => {
            let (definition, removed) = service.delete_recurring(&id)?;
            println!(
                "Deleted recurring income {} and {} occurrences",
                definition.source, removed
            );
        }

        IncomeCommands::Received { id, undo } => {
            let income = service.set_received(&id, !undo)?;
            let state = if income.received {
                "received"
            } else {
                "not received"
            };
            println!("Marked {} ({}) as {}", income.source, income.id, state);
        }

        IncomeCommands::Delete { id } => {
            let income = service.delete(&id)?;
            println!("Deleted income {} ({})", income.source, income.id);
        }

        IncomeCommands::List { recurring } => {
            if recurring {
                print!("{}", format_recurring_incomes(&service.list_recurring()?, &style));
            } else {
                print!(
                    "{}",
                    format_year_groups(&service.list_grouped()?, &style, "No income recorded.")
                );
            }
        }

        IncomeCommands::Report => {
            print!("{}", format_periods(&service.reconcile()?, &style));
        }
    }

    Ok(())
}
