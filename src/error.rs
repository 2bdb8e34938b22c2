//! Custom error types for payperiod
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for payperiod operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// A recurrence ends before (or on) the day it starts
    #[error("Invalid date range: end date {end} is not after start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Unrecognized frequency code
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    /// A known frequency used where its domain does not allow it
    #[error("Invalid frequency: '{frequency}' is not supported for {domain}")]
    UnsupportedFrequency {
        frequency: String,
        domain: &'static str,
    },

    /// Expansion exceeded the safety cap
    #[error("Too many instances: recurrence would generate more than {limit} occurrences")]
    TooManyInstances { limit: usize },

    /// A field required for the operation was absent
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl BudgetError {
    /// Create a "not found" error for expense instances
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for recurring expense definitions
    pub fn recurring_expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Recurring expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for income instances
    pub fn income_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for recurring income definitions
    pub fn recurring_income_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Recurring income",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for bills
    pub fn bill_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Bill",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for paychecks
    pub fn paycheck_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Paycheck",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidDateRange { .. }
                | Self::InvalidFrequency(_)
                | Self::UnsupportedFrequency { .. }
                | Self::MissingRequiredField(_)
        )
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for payperiod operations
pub type BudgetResult<T> = Result<T, BudgetError>;
