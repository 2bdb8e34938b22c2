//! Bills and paychecks
//!
//! Flat dated records without recurrence. Paychecks anchor the pay periods
//! that bills are reconciled against.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entry::{validate_fields, Dated, DatedAmount, EntryValidationError};
use super::ids::{BillId, PaycheckId};
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub name: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    pub fn new(name: impl Into<String>, amount: Money, due_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: BillId::new(),
            name: name.into(),
            amount,
            due_date,
            paid: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_paid(&mut self, paid: bool, at: DateTime<Utc>) {
        self.paid = paid;
        self.updated_at = at;
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.paid && self.due_date < today
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_fields(&self.name, self.amount)
    }
}

impl Dated for Bill {
    fn date(&self) -> NaiveDate {
        self.due_date
    }
}

impl DatedAmount for Bill {
    fn amount(&self) -> Money {
        self.amount
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paycheck {
    pub id: PaycheckId,
    /// Employer or other payer
    pub payer: String,
    pub amount: Money,
    pub pay_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Paycheck {
    pub fn new(payer: impl Into<String>, amount: Money, pay_date: NaiveDate) -> Self {
        Self {
            id: PaycheckId::new(),
            payer: payer.into(),
            amount,
            pay_date,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_fields(&self.payer, self.amount)
    }
}

impl Dated for Paycheck {
    fn date(&self) -> NaiveDate {
        self.pay_date
    }
}

impl DatedAmount for Paycheck {
    fn amount(&self) -> Money {
        self.amount
    }
}
