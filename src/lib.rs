//! payperiod - paycheck-to-paycheck budgeting
//!
//! This library provides the core of the payperiod budgeting tool:
//! recurring expenses and income are expanded into dated instances, and
//! each paycheck (or salary payment) opens a period that is charged with
//! everything due before the next one.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, income, bills, paychecks)
//! - `recurrence`: Frequency calendar and recurrence expansion
//! - `reports`: Period reconciliation and year/month grouping
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `display`, `export`, `cli`: Terminal output, file export and commands
//!
//! # Example
//!
//! ```rust,ignore
//! use payperiod::config::{paths::PayPaths, settings::Settings};
//!
//! let paths = PayPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod recurrence;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
