//! Income service
//!
//! Mirrors the expense service for income, using the wider income frequency
//! set, and owns the income-vs-expense report.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::audit::{AuditEntry, EntityType};
use crate::clock::Clock;
use crate::config::settings::{Settings, DEFAULT_MAX_GENERATED_INSTANCES};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Expense, FrequencyDomain, Income, Money, RecurringIncome};
use crate::recurrence::{expand, ExpandOptions, FrequencyTable};
use crate::reports::{group_by_year_month, reconcile_periods, PeriodSummary, YearGroup};
use crate::storage::{with_rollback, Storage};

use super::drafts::{InstanceChanges, RecurringChanges, RecurringDraft};

/// A salary period: salary anchor, extra income and the expenses due in it
pub type IncomePeriod = PeriodSummary<Income, Expense>;

#[derive(Debug, Clone)]
pub struct RecurringIncomeOutcome {
    pub definition: RecurringIncome,
    pub generated: Vec<Income>,
    pub replaced: usize,
}

pub struct IncomeService<'a> {
    storage: &'a Storage,
    clock: &'a dyn Clock,
    max_instances: usize,
    salary_source: String,
}

impl<'a> IncomeService<'a> {
    pub fn new(storage: &'a Storage, clock: &'a dyn Clock) -> Self {
        Self {
            storage,
            clock,
            max_instances: DEFAULT_MAX_GENERATED_INSTANCES,
            salary_source: Settings::default().salary_source,
        }
    }

    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.max_instances = settings.max_generated_instances;
        self.salary_source = settings.salary_source.clone();
        self
    }

    fn options(&self) -> ExpandOptions {
        ExpandOptions::default().with_max_instances(self.max_instances)
    }

    pub fn create_one_time(
        &self,
        source: &str,
        description: &str,
        amount: Money,
        received_date: NaiveDate,
    ) -> BudgetResult<Income> {
        let income = Income::new(source.trim(), amount, received_date).with_description(description);
        income
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.incomes.upsert(income.clone())?;
        self.storage.incomes.save()?;
        self.storage
            .log_create(EntityType::Income, income.id, &income.source, &income)?;

        Ok(income)
    }

    /// Create a recurring income and materialize every occurrence
    pub fn create_recurring(&self, draft: RecurringDraft) -> BudgetResult<RecurringIncomeOutcome> {
        let rule = draft.rule();
        rule.validate(FrequencyDomain::Income)?;

        let definition = RecurringIncome::new(draft.name.trim(), draft.amount, rule)
            .with_description(draft.description);
        definition
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let generated = expand(
            &definition.rule,
            &FrequencyTable::INCOME,
            self.options(),
            self.clock,
            |date| Income::occurrence_of(&definition, date),
        )?;

        let definitions = &self.storage.recurring_incomes;
        let instances = &self.storage.incomes;
        with_rollback(definitions, instances, || {
            definitions.upsert(definition.clone())?;
            definitions.save()?;
            instances.insert_many(generated.clone())?;
            instances.save()
        })?;

        self.storage.log_create(
            EntityType::RecurringIncome,
            definition.id,
            &definition.source,
            &definition,
        )?;
        self.storage.log_generated(
            EntityType::Income,
            definition.id,
            &definition.source,
            generated.len(),
        )?;

        info!(
            id = %definition.id,
            rule = %definition.rule.describe(),
            count = generated.len(),
            "created recurring income"
        );

        Ok(RecurringIncomeOutcome {
            definition,
            generated,
            replaced: 0,
        })
    }

    /// Apply changes and regenerate occurrences from today on
    pub fn update_recurring(
        &self,
        id: &str,
        changes: RecurringChanges,
    ) -> BudgetResult<RecurringIncomeOutcome> {
        let before = self.find_recurring(id)?;
        let mut updated = before.clone();

        if let Some(source) = &changes.name {
            updated.source = source.trim().to_string();
        }
        if let Some(description) = &changes.description {
            updated.description = description.clone();
        }
        if let Some(amount) = changes.amount {
            updated.amount = amount;
        }
        changes.apply_to_rule(&mut updated.rule);

        updated.rule.validate(FrequencyDomain::Income)?;
        updated
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        updated.touch(self.clock.now());

        let generated = expand(
            &updated.rule,
            &FrequencyTable::INCOME,
            self.options().skipping_past(),
            self.clock,
            |date| Income::occurrence_of(&updated, date),
        )?;

        let today = self.clock.today();
        let definitions = &self.storage.recurring_incomes;
        let instances = &self.storage.incomes;
        let replaced = with_rollback(definitions, instances, || {
            let replaced = instances.replace_from(updated.id, today, generated.clone())?;
            definitions.upsert(updated.clone())?;
            definitions.save()?;
            Ok(replaced)
        })?;

        self.storage.log_update(
            EntityType::RecurringIncome,
            updated.id,
            &updated.source,
            &before,
            &updated,
        )?;
        self.storage.log_generated(
            EntityType::Income,
            updated.id,
            &updated.source,
            generated.len(),
        )?;

        debug!(
            id = %updated.id,
            %today,
            replaced,
            generated = generated.len(),
            "regenerated recurring income"
        );

        Ok(RecurringIncomeOutcome {
            definition: updated,
            generated,
            replaced,
        })
    }

    pub fn delete_recurring(&self, id: &str) -> BudgetResult<(RecurringIncome, usize)> {
        let definition = self.find_recurring(id)?;

        let definitions = &self.storage.recurring_incomes;
        let instances = &self.storage.incomes;
        let removed = with_rollback(definitions, instances, || {
            let removed = instances.delete_by_parent(definition.id)?;
            definitions.delete(definition.id)?;
            instances.save()?;
            definitions.save()?;
            Ok(removed)
        })?;

        let entry = AuditEntry::delete(EntityType::RecurringIncome, definition.id, &definition)
            .named(&definition.source)
            .with_count(removed.len());
        self.storage.audit().log(&entry)?;

        info!(id = %definition.id, removed = removed.len(), "deleted recurring income");
        Ok((definition, removed.len()))
    }

    pub fn update_instance(&self, id: &str, changes: InstanceChanges) -> BudgetResult<Income> {
        let before = self.find(id)?;
        let mut updated = before.clone();

        if let Some(source) = &changes.name {
            updated.source = source.trim().to_string();
        }
        if let Some(description) = &changes.description {
            updated.description = description.clone();
        }
        if let Some(amount) = changes.amount {
            updated.amount = amount;
        }
        if let Some(date) = changes.date {
            updated.received_date = date;
        }
        updated
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        updated.updated_at = self.clock.now();

        self.storage.incomes.upsert(updated.clone())?;
        self.storage.incomes.save()?;
        self.storage
            .log_update(EntityType::Income, updated.id, &updated.source, &before, &updated)?;

        Ok(updated)
    }

    pub fn set_received(&self, id: &str, received: bool) -> BudgetResult<Income> {
        let before = self.find(id)?;
        let mut updated = before.clone();
        updated.set_received(received, self.clock.now());

        self.storage.incomes.upsert(updated.clone())?;
        self.storage.incomes.save()?;
        self.storage
            .log_update(EntityType::Income, updated.id, &updated.source, &before, &updated)?;

        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> BudgetResult<Income> {
        let income = self.find(id)?;
        self.storage.incomes.delete(income.id)?;
        self.storage.incomes.save()?;
        self.storage
            .log_delete(EntityType::Income, income.id, &income.source, &income)?;
        Ok(income)
    }

    pub fn find(&self, id: &str) -> BudgetResult<Income> {
        self.storage
            .incomes
            .find(id)?
            .ok_or_else(|| BudgetError::income_not_found(id))
    }

    pub fn find_recurring(&self, id: &str) -> BudgetResult<RecurringIncome> {
        self.storage
            .recurring_incomes
            .find(id)?
            .ok_or_else(|| BudgetError::recurring_income_not_found(id))
    }

    pub fn list(&self) -> BudgetResult<Vec<Income>> {
        self.storage.incomes.list()
    }

    pub fn list_recurring(&self) -> BudgetResult<Vec<RecurringIncome>> {
        self.storage.recurring_incomes.list()
    }

    pub fn instances_of(&self, id: &str) -> BudgetResult<Vec<Income>> {
        let definition = self.find_recurring(id)?;
        self.storage.incomes.children_of(definition.id)
    }

    pub fn list_grouped(&self) -> BudgetResult<Vec<YearGroup<Income>>> {
        Ok(group_by_year_month(&self.list()?))
    }

    /// Expected income not yet received, dated before today
    pub fn overdue(&self) -> BudgetResult<Vec<Income>> {
        let today = self.clock.today();
        Ok(self
            .list()?
            .into_iter()
            .filter(|i| i.is_overdue(today))
            .collect())
    }

    /// Salary periods reconciled against expenses
    ///
    /// Each salary entry opens a period; other income dated inside it is
    /// added to the period's income before expenses are subtracted.
    pub fn reconcile(&self) -> BudgetResult<Vec<IncomePeriod>> {
        let incomes = self.list()?;
        let expenses = self.storage.expenses.list()?;
        let salary = self.salary_source.as_str();

        let periods = reconcile_periods(&incomes, &expenses, |income| income.is_from(salary));
        debug!(
            salary_source = salary,
            incomes = incomes.len(),
            expenses = expenses.len(),
            periods = periods.len(),
            "reconciled income against expenses"
        );
        Ok(periods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::paths::PayPaths;
    use crate::models::Frequency;
    use crate::services::ExpenseService;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(PayPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_semi_monthly_salary() {
        let (_temp, storage) = create_test_storage();
        let clock = FixedClock::on(date(2024, 1, 1));
        let service = IncomeService::new(&storage, &clock);

        let draft = RecurringDraft::new(
            "salary",
            Money::from_units(2000),
            Frequency::SemiMonthly,
            date(2024, 1, 1),
            Some(date(2024, 2, 28)),
        );
        let outcome = service.create_recurring(draft).unwrap();
        let dates: Vec<_> = outcome.generated.iter().map(|i| i.received_date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 1), date(2024, 1, 15), date(2024, 2, 1), date(2024, 2, 15)]
        );
        assert!(outcome.generated.iter().all(|i| !i.received));
    }

    #[test]
    fn test_open_ended_income_rejected() {
        let (_temp, storage) = create_test_storage();
        let clock = FixedClock::on(date(2024, 1, 1));
        let service = IncomeService::new(&storage, &clock);

        let draft =
            RecurringDraft::new("salary", Money::from_units(1), Frequency::Weekly, date(2024, 1, 1), None);
        assert!(matches!(
            service.create_recurring(draft),
            Err(BudgetError::MissingRequiredField("end_date"))
        ));
        assert!(service.list_recurring().unwrap().is_empty());
    }

    #[test]
    fn test_update_recurring_income() {
        let (_temp, storage) = create_test_storage();
        let created_on = FixedClock::on(date(2024, 1, 1));
        let draft = RecurringDraft::new(
            "salary",
            Money::from_units(2000),
            Frequency::BiWeekly,
            date(2024, 1, 5),
            Some(date(2024, 3, 1)),
        );
        let outcome = IncomeService::new(&storage, &created_on)
            .create_recurring(draft)
            .unwrap();
        assert_eq!(outcome.generated.len(), 5);

        let later = FixedClock::on(date(2024, 2, 2));
        let service = IncomeService::new(&storage, &later);
        let id = outcome.definition.id.to_string();
        let result = service
            .update_recurring(
                &id,
                RecurringChanges {
                    amount: Some(Money::from_units(2100)),
                    ..Default::default()
                },
            )
            .unwrap();

        // Jan 5, Jan 19 and Feb 2 onward: Feb 2, Feb 16, Mar 1
        assert_eq!(result.replaced, 3);
        let amounts: Vec<_> = service
            .instances_of(&id)
            .unwrap()
            .iter()
            .map(|i| i.amount.cents() / 100)
            .collect();
        assert_eq!(amounts, vec![2000, 2000, 2100, 2100, 2100]);
    }

    #[test]
    fn test_reconcile_salary_periods() {
        let (_temp, storage) = create_test_storage();
        let clock = FixedClock::on(date(2024, 1, 1));
        let incomes = IncomeService::new(&storage, &clock);
        let expenses = ExpenseService::new(&storage, &clock);

        incomes
            .create_one_time("Salary", "", Money::from_units(2000), date(2024, 1, 5))
            .unwrap();
        incomes
            .create_one_time("freelance", "", Money::from_units(300), date(2024, 1, 12))
            .unwrap();
        incomes
            .create_one_time("salary", "", Money::from_units(2000), date(2024, 1, 19))
            .unwrap();
        expenses
            .create_one_time("Rent", "", Money::from_units(500), date(2024, 1, 10))
            .unwrap();
        expenses
            .create_one_time("Phone", "", Money::from_units(300), date(2024, 1, 20))
            .unwrap();

        let periods = incomes.reconcile().unwrap();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].additional_total, Money::from_units(300));
        assert_eq!(periods[0].remaining, Money::from_units(1800));
        assert_eq!(periods[1].remaining, Money::from_units(1700));
    }

    #[test]
    fn test_custom_salary_source() {
        let (_temp, storage) = create_test_storage();
        let clock = FixedClock::on(date(2024, 1, 1));
        let mut settings = Settings::default();
        settings.salary_source = "wages".into();
        let service = IncomeService::new(&storage, &clock).with_settings(&settings);

        service
            .create_one_time("salary", "", Money::from_units(1), date(2024, 1, 5))
            .unwrap();
        assert!(service.reconcile().unwrap().is_empty());

        service
            .create_one_time("Wages", "", Money::from_units(1), date(2024, 1, 6))
            .unwrap();
        assert_eq!(service.reconcile().unwrap().len(), 1);
    }

    #[test]
    fn test_set_received_and_delete() {
        let (_temp, storage) = create_test_storage();
        let clock = FixedClock::on(date(2024, 2, 1));
        let service = IncomeService::new(&storage, &clock);

        let income = service
            .create_one_time("refund", "tax", Money::from_units(80), date(2024, 1, 20))
            .unwrap();
        assert_eq!(service.overdue().unwrap().len(), 1);

        let id = income.id.to_string();
        let received = service.set_received(&id, true).unwrap();
        assert!(received.received);
        assert_eq!(received.updated_at, clock.now());
        assert!(service.overdue().unwrap().is_empty());

        let edited = service
            .update_instance(
                &id,
                InstanceChanges {
                    amount: Some(Money::from_units(85)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(edited.updated_at, clock.now());

        service.delete(&id).unwrap();
        assert!(service.find(&id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_recurring_failed_save_keeps_definition_and_instances() {
        let (_temp, storage) = create_test_storage();
        let clock = FixedClock::on(date(2024, 1, 1));
        let service = IncomeService::new(&storage, &clock);
        let draft = RecurringDraft::new(
            "salary",
            Money::from_units(2000),
            Frequency::SemiMonthly,
            date(2024, 1, 1),
            Some(date(2024, 2, 28)),
        );
        let id = service.create_recurring(draft).unwrap().definition.id.to_string();

        let path = storage.paths().incomes_file();
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        assert!(service.delete_recurring(&id).is_err());
        assert_eq!(service.instances_of(&id).unwrap().len(), 4);
        assert_eq!(service.list_recurring().unwrap().len(), 1);
    }

    #[test]
    fn test_create_recurring_failed_save_stores_nothing() {
        let (_temp, storage) = create_test_storage();
        let path = storage.paths().incomes_file();
        let _ = std::fs::remove_file(&path);
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let clock = FixedClock::on(date(2024, 1, 1));
        let service = IncomeService::new(&storage, &clock);
        let draft = RecurringDraft::new(
            "salary",
            Money::from_units(2000),
            Frequency::Weekly,
            date(2024, 1, 1),
            Some(date(2024, 3, 1)),
        );
        assert!(service.create_recurring(draft).is_err());
        assert!(service.list().unwrap().is_empty());
        assert!(service.list_recurring().unwrap().is_empty());
    }
}
