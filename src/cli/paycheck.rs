//! Paycheck CLI commands

use clap::Subcommand;

use super::{date_or_today, parse_amount};
use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::display::{format_entry_list, format_periods, DisplayStyle};
use crate::error::BudgetResult;
use crate::services::PaycheckService;
use crate::storage::Storage;

/// Paycheck subcommands
#[derive(Subcommand)]
pub enum PaycheckCommands {
    /// Record a paycheck
    Add {
        /// Who paid it
        payer: String,
        amount: String,
        /// Pay date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete a paycheck
    Delete { id: String },

    /// List paychecks by date
    List,

    /// Show each pay period with the bills due before the next paycheck
    Report,
}

/// Handle a paycheck command
pub fn handle_paycheck_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: PaycheckCommands,
) -> BudgetResult<()> {
    let service = PaycheckService::new(storage);
    let style = DisplayStyle::from_settings(settings);

    match cmd {
        PaycheckCommands::Add {
            payer,
            amount,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let pay_date = date_or_today(date.as_deref(), clock)?;
            let paycheck = service.create(&payer, amount, pay_date)?;
            println!(
                "Added paycheck from {} {} on {} ({})",
                paycheck.payer,
                style.money(paycheck.amount),
                style.date(paycheck.pay_date),
                paycheck.id
            );
        }

        PaycheckCommands::Delete { id } => {
            let paycheck = service.delete(&id)?;
            println!("Deleted paycheck from {} ({})", paycheck.payer, paycheck.id);
        }

        PaycheckCommands::List => {
            print!("{}", format_entry_list(&service.list()?, &style, "No paychecks recorded."));
        }

        PaycheckCommands::Report => {
            print!("{}", format_periods(&service.report()?, &style));
        }
    }

    Ok(())
}
