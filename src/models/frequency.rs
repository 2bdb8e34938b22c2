//! Recurrence frequencies
//!
//! Expenses repeat daily, weekly, monthly or yearly. Income additionally
//! supports bi-weekly and semi-monthly schedules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BudgetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    SemiMonthly,
    Yearly,
}

impl Frequency {
    /// Canonical wire code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi-weekly",
            Self::Monthly => "monthly",
            Self::SemiMonthly => "semi-monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::BiWeekly => "Every two weeks",
            Self::Monthly => "Monthly",
            Self::SemiMonthly => "Twice a month",
            Self::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Frequency {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "bi-weekly" | "biweekly" => Ok(Self::BiWeekly),
            "monthly" => Ok(Self::Monthly),
            "semi-monthly" | "semimonthly" => Ok(Self::SemiMonthly),
            "yearly" | "annually" => Ok(Self::Yearly),
            _ => Err(BudgetError::InvalidFrequency(s.trim().to_string())),
        }
    }
}

/// Which set of frequencies a recurring definition may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyDomain {
    Expense,
    Income,
}

impl FrequencyDomain {
    pub fn supported(&self) -> &'static [Frequency] {
        match self {
            Self::Expense => &[
                Frequency::Daily,
                Frequency::Weekly,
                Frequency::Monthly,
                Frequency::Yearly,
            ],
            Self::Income => &[
                Frequency::Daily,
                Frequency::Weekly,
                Frequency::BiWeekly,
                Frequency::Monthly,
                Frequency::SemiMonthly,
                Frequency::Yearly,
            ],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Expense => "expenses",
            Self::Income => "income",
        }
    }

    pub fn supports(&self, frequency: Frequency) -> bool {
        self.supported().contains(&frequency)
    }

    /// Parse a frequency code and check it belongs to this domain
    pub fn parse(&self, code: &str) -> Result<Frequency, BudgetError> {
        let frequency: Frequency = code.parse()?;
        self.ensure_supported(frequency)?;
        Ok(frequency)
    }

    pub fn ensure_supported(&self, frequency: Frequency) -> Result<(), BudgetError> {
        if self.supports(frequency) {
            Ok(())
        } else {
            Err(BudgetError::UnsupportedFrequency {
                frequency: frequency.code().to_string(),
                domain: self.name(),
            })
        }
    }
}
