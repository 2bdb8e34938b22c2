//! Storage layer for payperiod
//!
//! One JSON file per collection under `data/`, written atomically, plus the
//! append-only audit log. Services reach every collection through
//! [`Storage`].

pub mod file_io;
pub mod records;
pub mod repository;

pub use file_io::{read_json, write_json_atomic};
pub use repository::{with_rollback, Child, Record, Repository, Snapshot};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::PayPaths;
use crate::error::BudgetResult;
use crate::models::{Bill, Expense, Income, Paycheck, RecurringExpense, RecurringIncome};

/// Owns every repository and the audit logger
pub struct Storage {
    paths: PayPaths,
    pub expenses: Repository<Expense>,
    pub recurring_expenses: Repository<RecurringExpense>,
    pub incomes: Repository<Income>,
    pub recurring_incomes: Repository<RecurringIncome>,
    pub bills: Repository<Bill>,
    pub paychecks: Repository<Paycheck>,
    audit: AuditLogger,
}

impl Storage {
    /// Create the directory layout if needed and wire up the repositories
    ///
    /// Nothing is read from disk until [`Storage::load_all`].
    pub fn new(paths: PayPaths) -> BudgetResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: Repository::new(paths.expenses_file()),
            recurring_expenses: Repository::new(paths.recurring_expenses_file()),
            incomes: Repository::new(paths.incomes_file()),
            recurring_incomes: Repository::new(paths.recurring_incomes_file()),
            bills: Repository::new(paths.bills_file()),
            paychecks: Repository::new(paths.paychecks_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Open and load everything in one step
    pub fn open(paths: PayPaths) -> BudgetResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &PayPaths {
        &self.paths
    }

    pub fn load_all(&self) -> BudgetResult<()> {
        self.expenses.load()?;
        self.recurring_expenses.load()?;
        self.incomes.load()?;
        self.recurring_incomes.load()?;
        self.bills.load()?;
        self.paychecks.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> BudgetResult<()> {
        self.expenses.save()?;
        self.recurring_expenses.save()?;
        self.incomes.save()?;
        self.recurring_incomes.save()?;
        self.bills.save()?;
        self.paychecks.save()?;
        Ok(())
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl std::fmt::Display,
        name: &str,
        entity: &T,
    ) -> BudgetResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity).named(name))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl std::fmt::Display,
        name: &str,
        before: &T,
        after: &T,
    ) -> BudgetResult<()> {
        self.audit
            .log(&AuditEntry::update(entity_type, entity_id, before, after).named(name))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl std::fmt::Display,
        name: &str,
        entity: &T,
    ) -> BudgetResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity).named(name))
    }

    /// Record that `count` instances of `parent_id` were materialized
    pub fn log_generated(
        &self,
        entity_type: EntityType,
        parent_id: impl std::fmt::Display,
        name: &str,
        count: usize,
    ) -> BudgetResult<()> {
        self.audit
            .log(&AuditEntry::generate(entity_type, parent_id, count).named(name))
    }
}
