//! Expense model
//!
//! An `Expense` is one dated occurrence, either entered directly or
//! materialized from a `RecurringExpense`. Generated instances are stored
//! like any other so individual future occurrences can be edited freely.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entry::{validate_fields, Dated, DatedAmount, EntryKind, EntryValidationError};
use super::ids::{ExpenseId, RecurringExpenseId};
use super::money::Money;
use super::recurrence::RecurrenceRule;

/// A single expense occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub kind: EntryKind,
    #[serde(default)]
    pub paid: bool,
    /// Lookup key of the definition that generated this instance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<RecurringExpenseId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a one-time expense
    pub fn new(name: impl Into<String>, amount: Money, due_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            name: name.into(),
            description: String::new(),
            amount,
            due_date,
            kind: EntryKind::OneTime,
            paid: false,
            recurring_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Materialize one occurrence of a recurring definition, unpaid
    pub fn occurrence_of(definition: &RecurringExpense, due_date: NaiveDate) -> Self {
        let mut expense = Self::new(definition.name.clone(), definition.amount, due_date);
        expense.description = definition.description.clone();
        expense.kind = EntryKind::Recurring;
        expense.recurring_id = Some(definition.id);
        expense
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn set_paid(&mut self, paid: bool, at: DateTime<Utc>) {
        self.paid = paid;
        self.updated_at = at;
    }

    /// Unpaid and due before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.paid && self.due_date < today
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_fields(&self.name, self.amount)
    }
}

impl Dated for Expense {
    fn date(&self) -> NaiveDate {
        self.due_date
    }
}

impl DatedAmount for Expense {
    fn amount(&self) -> Money {
        self.amount
    }
}

/// A recurring expense definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: RecurringExpenseId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub amount: Money,
    pub rule: RecurrenceRule,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecurringExpense {
    pub fn new(name: impl Into<String>, amount: Money, rule: RecurrenceRule) -> Self {
        let now = Utc::now();
        Self {
            id: RecurringExpenseId::new(),
            name: name.into(),
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
        validate_fields(&self.name, self.amount)
    }
}
