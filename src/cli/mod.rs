//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod bill;
pub mod expense;
pub mod export;
pub mod income;
pub mod paycheck;

pub use audit::handle_audit_command;
pub use bill::{handle_bill_command, BillCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportArgs, ExportTarget};
pub use income::{handle_income_command, IncomeCommands};
pub use paycheck::{handle_paycheck_command, PaycheckCommands};

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Frequency, Money};
use crate::recurrence::parse_boundary_date;

pub(crate) fn parse_amount(input: &str) -> BudgetResult<Money> {
    Money::parse(input).map_err(|e| BudgetError::Validation(format!("Invalid amount: {}", e)))
}

pub(crate) fn parse_optional_amount(input: Option<&str>) -> BudgetResult<Option<Money>> {
    input.map(parse_amount).transpose()
}

pub(crate) fn parse_optional_date(input: Option<&str>) -> BudgetResult<Option<NaiveDate>> {
    input.map(parse_boundary_date).transpose()
}

/// Parse a date argument, defaulting to today
pub(crate) fn date_or_today(input: Option<&str>, clock: &dyn Clock) -> BudgetResult<NaiveDate> {
    Ok(parse_optional_date(input)?.unwrap_or_else(|| clock.today()))
}

pub(crate) fn parse_frequency(input: &str) -> BudgetResult<Frequency> {
    input.parse()
}

pub(crate) fn parse_optional_frequency(input: Option<&str>) -> BudgetResult<Option<Frequency>> {
    input.map(parse_frequency).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn test_date_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let clock = FixedClock::on(today);
        assert_eq!(date_or_today(None, &clock).unwrap(), today);
        assert_eq!(
            date_or_today(Some("2024-06-01"), &clock).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_bad_amount_is_validation_error() {
        let err = parse_amount("ten dollars").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Invalid amount"));
    }

    #[test]
    fn test_frequency_aliases() {
        assert_eq!(parse_frequency("BiWeekly").unwrap(), Frequency::BiWeekly);
        assert!(parse_optional_frequency(None).unwrap().is_none());
        assert!(parse_frequency("fortnightly").is_err());
    }
}
