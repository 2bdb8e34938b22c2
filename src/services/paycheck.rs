//! Paycheck service and the bills-vs-paychecks report

use chrono::NaiveDate;
use tracing::debug;

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Bill, Money, Paycheck};
use crate::reports::{reconcile, PeriodSummary};
use crate::storage::Storage;

/// A pay period: one paycheck and the bills due before the next one
pub type PayPeriod = PeriodSummary<Paycheck, Bill>;

pub struct PaycheckService<'a> {
    storage: &'a Storage,
}

impl<'a> PaycheckService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, payer: &str, amount: Money, pay_date: NaiveDate) -> BudgetResult<Paycheck> {
        let paycheck = Paycheck::new(payer.trim(), amount, pay_date);
        paycheck
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.paychecks.upsert(paycheck.clone())?;
        self.storage.paychecks.save()?;
        self.storage
            .log_create(EntityType::Paycheck, paycheck.id, &paycheck.payer, &paycheck)?;

        Ok(paycheck)
    }

    pub fn delete(&self, id: &str) -> BudgetResult<Paycheck> {
        let paycheck = self.find(id)?;
        self.storage.paychecks.delete(paycheck.id)?;
        self.storage.paychecks.save()?;
        self.storage
            .log_delete(EntityType::Paycheck, paycheck.id, &paycheck.payer, &paycheck)?;
        Ok(paycheck)
    }

    pub fn find(&self, id: &str) -> BudgetResult<Paycheck> {
        self.storage
            .paychecks
            .find(id)?
            .ok_or_else(|| BudgetError::paycheck_not_found(id))
    }

    pub fn list(&self) -> BudgetResult<Vec<Paycheck>> {
        self.storage.paychecks.list()
    }

    /// Every paycheck opens a period; bills are bucketed into them
    pub fn report(&self) -> BudgetResult<Vec<PayPeriod>> {
        let paychecks = self.list()?;
        let bills = self.storage.bills.list()?;
        let periods = reconcile(&paychecks, &bills);
        debug!(
            paychecks = paychecks.len(),
            bills = bills.len(),
            "reconciled bills against paychecks"
        );
        Ok(periods)
    }
}
