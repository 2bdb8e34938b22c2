//! Traits and small types shared by every dated money record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Anything that sits on one calendar day
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// A dated record carrying an amount: the unit the reconciler and grouping work on
pub trait DatedAmount: Dated {
    fn amount(&self) -> Money;
}

/// Whether an instance was entered directly or generated from a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    #[default]
    OneTime,
    Recurring,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneTime => write!(f, "one-time"),
            Self::Recurring => write!(f, "recurring"),
        }
    }
}

/// Field-level validation failures shared by every record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyName,
    NegativeAmount,
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::NegativeAmount => write!(f, "Amount cannot be negative"),
        }
    }
}

impl std::error::Error for EntryValidationError {}

pub(crate) fn validate_fields(name: &str, amount: Money) -> Result<(), EntryValidationError> {
    if name.trim().is_empty() {
        return Err(EntryValidationError::EmptyName);
    }
    if amount.is_negative() {
        return Err(EntryValidationError::NegativeAmount);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fields() {
        assert!(validate_fields("Rent", Money::from_units(1200)).is_ok());
        assert!(validate_fields("Free trial", Money::zero()).is_ok());
        assert_eq!(
            validate_fields("  ", Money::from_units(1)),
            Err(EntryValidationError::EmptyName)
        );
        assert_eq!(
            validate_fields("Rent", Money::from_cents(-1)),
            Err(EntryValidationError::NegativeAmount)
        );
    }

    #[test]
    fn test_entry_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&EntryKind::OneTime).unwrap(),
            "\"one-time\""
        );
        assert_eq!(EntryKind::Recurring.to_string(), "recurring");
    }
}
