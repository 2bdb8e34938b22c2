//! Inputs shared by the expense and income services

use chrono::NaiveDate;

use crate::models::{Frequency, Money, RecurrenceRule};

/// A new recurring definition as entered by the user
///
/// `name` is the expense name, or the income source.
#[derive(Debug, Clone)]
pub struct RecurringDraft {
    pub name: String,
    pub description: String,
    pub amount: Money,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl RecurringDraft {
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        frequency: Frequency,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            amount,
            frequency,
            start_date,
            end_date,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn rule(&self) -> RecurrenceRule {
        RecurrenceRule::new(self.frequency, self.start_date, self.end_date)
    }
}

/// Partial update of a recurring definition; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct RecurringChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub frequency: Option<Frequency>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl RecurringChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.frequency.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    pub(crate) fn apply_to_rule(&self, rule: &mut RecurrenceRule) {
        if let Some(frequency) = self.frequency {
            rule.frequency = frequency;
        }
        if let Some(start) = self.start_date {
            rule.start_date = start;
        }
        if let Some(end) = self.end_date {
            rule.end_date = Some(end);
        }
    }
}

/// Free-form edit of one materialized occurrence
#[derive(Debug, Clone, Default)]
pub struct InstanceChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
}

impl InstanceChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.amount.is_none() && self.date.is_none()
    }
}
