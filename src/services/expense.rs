//! Expense service
//!
//! One-time expenses, recurring expense definitions and the instances they
//! materialize. Creating or editing a definition expands it first and only
//! touches storage once the whole instance list is known.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::audit::{AuditEntry, EntityType};
use crate::clock::Clock;
use crate::config::settings::{Settings, DEFAULT_MAX_GENERATED_INSTANCES};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Expense, FrequencyDomain, Money, RecurringExpense};
use crate::recurrence::{expand, ExpandOptions, FrequencyTable};
use crate::reports::{group_by_year_month, YearGroup};
use crate::storage::{with_rollback, Storage};

use super::drafts::{InstanceChanges, RecurringChanges, RecurringDraft};

/// A recurring definition together with the instances it produced
#[derive(Debug, Clone)]
pub struct RecurringExpenseOutcome {
    pub definition: RecurringExpense,
    pub generated: Vec<Expense>,
    /// Instances dated today or later that were dropped (updates only)
    pub replaced: usize,
}

pub struct ExpenseService<'a> {
    storage: &'a Storage,
    clock: &'a dyn Clock,
    max_instances: usize,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage, clock: &'a dyn Clock) -> Self {
        Self {
            storage,
            clock,
            max_instances: DEFAULT_MAX_GENERATED_INSTANCES,
        }
    }

    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.max_instances = settings.max_generated_instances;
        self
    }

    fn options(&self) -> ExpandOptions {
        ExpandOptions::default().with_max_instances(self.max_instances)
    }

    /// Record a one-time expense
    pub fn create_one_time(
        &self,
        name: &str,
        description: &str,
        amount: Money,
        due_date: NaiveDate,
    ) -> BudgetResult<Expense> {
        let expense = Expense::new(name.trim(), amount, due_date).with_description(description);
        expense
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage
            .log_create(EntityType::Expense, expense.id, &expense.name, &expense)?;

        Ok(expense)
    }

    /// Create a recurring definition and materialize every occurrence
    ///
    /// Nothing is stored if validation or expansion fails.
    pub fn create_recurring(&self, draft: RecurringDraft) -> BudgetResult<RecurringExpenseOutcome> {
        let rule = draft.rule();
        rule.validate(FrequencyDomain::Expense)?;

        let definition = RecurringExpense::new(draft.name.trim(), draft.amount, rule)
            .with_description(draft.description);
        definition
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let generated = expand(
            &definition.rule,
            &FrequencyTable::EXPENSE,
            self.options(),
            self.clock,
            |date| Expense::occurrence_of(&definition, date),
        )?;

        let definitions = &self.storage.recurring_expenses;
        let instances = &self.storage.expenses;
        with_rollback(definitions, instances, || {
            definitions.upsert(definition.clone())?;
            definitions.save()?;
            instances.insert_many(generated.clone())?;
            instances.save()
        })?;

        self.storage.log_create(
            EntityType::RecurringExpense,
            definition.id,
            &definition.name,
            &definition,
        )?;
        self.storage.log_generated(
            EntityType::Expense,
            definition.id,
            &definition.name,
            generated.len(),
        )?;

        info!(
            id = %definition.id,
            rule = %definition.rule.describe(),
            count = generated.len(),
            "created recurring expense"
        );

        Ok(RecurringExpenseOutcome {
            definition,
            generated,
            replaced: 0,
        })
    }

    /// Apply changes to a definition and regenerate its future occurrences
    ///
    /// Instances dated before today are left as they are. Those dated today
    /// or later are swapped for a fresh expansion in a single storage step.
    pub fn update_recurring(
        &self,
        id: &str,
        changes: RecurringChanges,
    ) -> BudgetResult<RecurringExpenseOutcome> {
        let before = self.find_recurring(id)?;
        let mut updated = before.clone();

        if let Some(name) = &changes.name {
            updated.name = name.trim().to_string();
        }
        if let Some(description) = &changes.description {
            updated.description = description.clone();
        }
        if let Some(amount) = changes.amount {
            updated.amount = amount;
        }
        changes.apply_to_rule(&mut updated.rule);

        updated.rule.validate(FrequencyDomain::Expense)?;
        updated
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        updated.touch(self.clock.now());

        let generated = expand(
            &updated.rule,
            &FrequencyTable::EXPENSE,
            self.options().skipping_past(),
            self.clock,
            |date| Expense::occurrence_of(&updated, date),
        )?;

        let today = self.clock.today();
        let definitions = &self.storage.recurring_expenses;
        let instances = &self.storage.expenses;
        let replaced = with_rollback(definitions, instances, || {
            let replaced = instances.replace_from(updated.id, today, generated.clone())?;
            definitions.upsert(updated.clone())?;
            definitions.save()?;
            Ok(replaced)
        })?;

        self.storage.log_update(
            EntityType::RecurringExpense,
            updated.id,
            &updated.name,
            &before,
            &updated,
        )?;
        self.storage.log_generated(
            EntityType::Expense,
            updated.id,
            &updated.name,
            generated.len(),
        )?;

        debug!(
            id = %updated.id,
            %today,
            replaced,
            generated = generated.len(),
            "regenerated recurring expense"
        );

        Ok(RecurringExpenseOutcome {
            definition: updated,
            generated,
            replaced,
        })
    }

    /// Delete a definition and every instance it generated
    ///
    /// Returns the definition and the number of instances removed.
    pub fn delete_recurring(&self, id: &str) -> BudgetResult<(RecurringExpense, usize)> {
        let definition = self.find_recurring(id)?;

        let definitions = &self.storage.recurring_expenses;
        let instances = &self.storage.expenses;
        let removed = with_rollback(definitions, instances, || {
            let removed = instances.delete_by_parent(definition.id)?;
            definitions.delete(definition.id)?;
            instances.save()?;
            definitions.save()?;
            Ok(removed)
        })?;

        let entry = AuditEntry::delete(
            EntityType::RecurringExpense,
            definition.id,
            &definition,
        )
        .named(&definition.name)
        .with_count(removed.len());
        self.storage.audit().log(&entry)?;

        info!(id = %definition.id, removed = removed.len(), "deleted recurring expense");
        Ok((definition, removed.len()))
    }

    /// Edit one occurrence without touching its definition
    pub fn update_instance(&self, id: &str, changes: InstanceChanges) -> BudgetResult<Expense> {
        let before = self.find(id)?;
        let mut updated = before.clone();

        if let Some(name) = &changes.name {
            updated.name = name.trim().to_string();
        }
        if let Some(description) = &changes.description {
            updated.description = description.clone();
        }
        if let Some(amount) = changes.amount {
            updated.amount = amount;
        }
        if let Some(date) = changes.date {
            updated.due_date = date;
        }
        updated
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        updated.updated_at = self.clock.now();

        self.storage.expenses.upsert(updated.clone())?;
        self.storage.expenses.save()?;
        self.storage
            .log_update(EntityType::Expense, updated.id, &updated.name, &before, &updated)?;

        Ok(updated)
    }

    pub fn set_paid(&self, id: &str, paid: bool) -> BudgetResult<Expense> {
        let before = self.find(id)?;
        let mut updated = before.clone();
        updated.set_paid(paid, self.clock.now());

        self.storage.expenses.upsert(updated.clone())?;
        self.storage.expenses.save()?;
        self.storage
            .log_update(EntityType::Expense, updated.id, &updated.name, &before, &updated)?;

        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> BudgetResult<Expense> {
        let expense = self.find(id)?;
        self.storage.expenses.delete(expense.id)?;
        self.storage.expenses.save()?;
        self.storage
            .log_delete(EntityType::Expense, expense.id, &expense.name, &expense)?;
        Ok(expense)
    }

    pub fn find(&self, id: &str) -> BudgetResult<Expense> {
        self.storage
            .expenses
            .find(id)?
            .ok_or_else(|| BudgetError::expense_not_found(id))
    }

    pub fn find_recurring(&self, id: &str) -> BudgetResult<RecurringExpense> {
        self.storage
            .recurring_expenses
            .find(id)?
            .ok_or_else(|| BudgetError::recurring_expense_not_found(id))
    }

    pub fn list(&self) -> BudgetResult<Vec<Expense>> {
        self.storage.expenses.list()
    }

    pub fn list_range(&self, start: NaiveDate, end: NaiveDate) -> BudgetResult<Vec<Expense>> {
        self.storage.expenses.range(start, end)
    }

    pub fn list_recurring(&self) -> BudgetResult<Vec<RecurringExpense>> {
        self.storage.recurring_expenses.list()
    }

    pub fn instances_of(&self, id: &str) -> BudgetResult<Vec<Expense>> {
        let definition = self.find_recurring(id)?;
        self.storage.expenses.children_of(definition.id)
    }

    /// Every expense grouped by year, then month
    pub fn list_grouped(&self) -> BudgetResult<Vec<YearGroup<Expense>>> {
        Ok(group_by_year_month(&self.list()?))
    }

    /// Unpaid expenses due before today
    pub fn overdue(&self) -> BudgetResult<Vec<Expense>> {
        let today = self.clock.today();
        Ok(self
            .list()?
            .into_iter()
            .filter(|e| e.is_overdue(today))
            .collect())
    }
}
