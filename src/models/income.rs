//! Income model
//!
//! Income entries are the primary stream of the income-vs-expense report.
//! Entries whose source is the configured salary source anchor the periods;
//! any other income inside a period is folded in as additional income.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entry::{validate_fields, Dated, DatedAmount, EntryKind, EntryValidationError};
use super::ids::{IncomeId, RecurringIncomeId};
use super::money::Money;
use super::recurrence::RecurrenceRule;

/// A single income occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: IncomeId,
    /// Where the money comes from ("salary", "freelance", ...)
    pub source: String,
    #[serde(default)]
    pub description: String,
    pub amount: Money,
    pub received_date: NaiveDate,
    #[serde(default)]
    pub kind: EntryKind,
    #[serde(default)]
    pub received: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<RecurringIncomeId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Income {
    /// Create a one-time income entry
    pub fn new(source: impl Into<String>, amount: Money, received_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: IncomeId::new(),
            source: source.into(),
            description: String::new(),
            amount,
            received_date,
            kind: EntryKind::OneTime,
            received: false,
            recurring_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Materialize one occurrence of a recurring definition, not yet received
    pub fn occurrence_of(definition: &RecurringIncome, received_date: NaiveDate) -> Self {
        let mut income = Self::new(definition.source.clone(), definition.amount, received_date);
        income.description = definition.description.clone();
        income.kind = EntryKind::Recurring;
        income.recurring_id = Some(definition.id);
        income
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn set_received(&mut self, received: bool, at: DateTime<Utc>) {
        self.received = received;
        self.updated_at = at;
    }

    /// Whether this entry's source names `salary_source` (trimmed, case-insensitive)
    pub fn is_from(&self, salary_source: &str) -> bool {
        self.source.trim().eq_ignore_ascii_case(salary_source.trim())
    }

    /// Not yet received and expected before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.received && self.received_date < today
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_fields(&self.source, self.amount)
    }
}

impl Dated for Income {
    fn date(&self) -> NaiveDate {
        self.received_date
    }
}

impl DatedAmount for Income {
    fn amount(&self) -> Money {
        self.amount
    }
}

/// A recurring income definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringIncome {
    pub id: RecurringIncomeId,
    pub source: String,
    #[serde(default)]
    pub description: String,
    pub amount: Money,
    pub rule: RecurrenceRule,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecurringIncome {
    pub fn new(source: impl Into<String>, amount: Money, rule: RecurrenceRule) -> Self {
        let now = Utc::now();
        Self {
            id: RecurringIncomeId::new(),
            source: source.into(),
            description: String::new(),
            amount,
            rule,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_fields(&self.source, self.amount)
    }
}
