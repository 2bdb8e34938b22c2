//! Recurrence rule: a frequency plus the date bounds it repeats within

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::frequency::{Frequency, FrequencyDomain};
use crate::error::BudgetError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    /// `None` repeats indefinitely; expansion is then bounded only by the instance cap
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency, start_date: NaiveDate, end_date: Option<NaiveDate>) -> Self {
        Self {
            frequency,
            start_date,
            end_date,
        }
    }

    pub fn bounded(frequency: Frequency, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self::new(frequency, start_date, Some(end_date))
    }

    pub fn is_open_ended(&self) -> bool {
        self.end_date.is_none()
    }

    /// The ordering check expansion itself enforces: start may not be after end
    pub fn check_order(&self) -> Result<(), BudgetError> {
        match self.end_date {
            Some(end) if self.start_date > end => Err(BudgetError::InvalidDateRange {
                start: self.start_date,
                end,
            }),
            _ => Ok(()),
        }
    }

    /// Creation-time validation for user-entered definitions
    ///
    /// An end date is required, must fall strictly after the start date, and
    /// the frequency must belong to the domain.
    pub fn validate(&self, domain: FrequencyDomain) -> Result<(), BudgetError> {
        domain.ensure_supported(self.frequency)?;
        let end = self
            .end_date
            .ok_or(BudgetError::MissingRequiredField("end_date"))?;
        if end <= self.start_date {
            return Err(BudgetError::InvalidDateRange {
                start: self.start_date,
                end,
            });
        }
        Ok(())
    }

    pub fn describe(&self) -> String {
        match self.end_date {
            Some(end) => format!(
                "{} from {} to {}",
                self.frequency.label(),
                self.start_date,
                end
            ),
            None => format!("{} from {}", self.frequency.label(), self.start_date),
        }
    }
}
