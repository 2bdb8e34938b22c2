//! Bill service

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::clock::Clock;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Bill, Money};
use crate::reports::{group_by_year_month, YearGroup};
use crate::storage::Storage;

pub struct BillService<'a> {
    storage: &'a Storage,
    clock: &'a dyn Clock,
}

impl<'a> BillService<'a> {
    pub fn new(storage: &'a Storage, clock: &'a dyn Clock) -> Self {
        Self { storage, clock }
    }

    pub fn create(&self, name: &str, amount: Money, due_date: NaiveDate) -> BudgetResult<Bill> {
        let bill = Bill::new(name.trim(), amount, due_date);
        bill.validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.bills.upsert(bill.clone())?;
        self.storage.bills.save()?;
        self.storage
            .log_create(EntityType::Bill, bill.id, &bill.name, &bill)?;

        Ok(bill)
    }

    pub fn set_paid(&self, id: &str, paid: bool) -> BudgetResult<Bill> {
        let before = self.find(id)?;
        let mut updated = before.clone();
        updated.set_paid(paid, self.clock.now());

        self.storage.bills.upsert(updated.clone())?;
        self.storage.bills.save()?;
        self.storage
            .log_update(EntityType::Bill, updated.id, &updated.name, &before, &updated)?;

        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> BudgetResult<Bill> {
        let bill = self.find(id)?;
        self.storage.bills.delete(bill.id)?;
        self.storage.bills.save()?;
        self.storage
            .log_delete(EntityType::Bill, bill.id, &bill.name, &bill)?;
        Ok(bill)
    }

    pub fn find(&self, id: &str) -> BudgetResult<Bill> {
        self.storage
            .bills
            .find(id)?
            .ok_or_else(|| BudgetError::bill_not_found(id))
    }

    pub fn list(&self) -> BudgetResult<Vec<Bill>> {
        self.storage.bills.list()
    }

    pub fn list_grouped(&self) -> BudgetResult<Vec<YearGroup<Bill>>> {
        Ok(group_by_year_month(&self.list()?))
    }

    pub fn overdue(&self) -> BudgetResult<Vec<Bill>> {
        let today = self.clock.today();
        Ok(self
            .list()?
            .into_iter()
            .filter(|b| b.is_overdue(today))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::paths::PayPaths;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bill_lifecycle() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(PayPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let clock = FixedClock::on(date(2024, 1, 15));
        let service = BillService::new(&storage, &clock);

        let electric = service
            .create("Electric", Money::from_cents(9_120), date(2024, 1, 10))
            .unwrap();
        service
            .create("Internet", Money::from_units(70), date(2024, 2, 3))
            .unwrap();
        assert_eq!(service.overdue().unwrap().len(), 1);

        let id = electric.id.to_string();
        service.set_paid(&id, true).unwrap();
        assert!(service.overdue().unwrap().is_empty());

        let groups = service.list_grouped().unwrap();
        assert_eq!(groups[0].months.len(), 2);

        service.delete(&id).unwrap();
        assert_eq!(service.list().unwrap().len(), 1);
        assert!(service.delete(&id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_blank_name_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(PayPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let clock = FixedClock::on(date(2024, 1, 1));
        let service = BillService::new(&storage, &clock);

        let err = service
            .create("  ", Money::from_units(1), date(2024, 1, 1))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(service.list().unwrap().is_empty());
    }
}
