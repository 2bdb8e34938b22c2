//! `Record` and `Child` implementations for the stored models

use chrono::NaiveDate;

use crate::models::{
    Bill, BillId, Expense, ExpenseId, Income, IncomeId, Paycheck, PaycheckId, RecurringExpense,
    RecurringExpenseId, RecurringIncome, RecurringIncomeId,
};

use super::repository::{Child, Record};

macro_rules! impl_record {
    ($model:ty, $id:ty, $date:expr) => {
        impl Record for $model {
            type Id = $id;

            fn record_id(&self) -> $id {
                self.id
            }

            fn record_date(&self) -> NaiveDate {
                let date: fn(&$model) -> NaiveDate = $date;
                date(self)
            }

            fn matches_id(&self, fragment: &str) -> bool {
                self.id.matches(fragment)
            }
        }
    };
}

impl_record!(Expense, ExpenseId, |e| e.due_date);
impl_record!(Income, IncomeId, |i| i.received_date);
impl_record!(Bill, BillId, |b| b.due_date);
impl_record!(Paycheck, PaycheckId, |p| p.pay_date);
impl_record!(RecurringExpense, RecurringExpenseId, |r| r.rule.start_date);
impl_record!(RecurringIncome, RecurringIncomeId, |r| r.rule.start_date);

impl Child for Expense {
    type Parent = RecurringExpenseId;

    fn parent(&self) -> Option<RecurringExpenseId> {
        self.recurring_id
    }
}

impl Child for Income {
    type Parent = RecurringIncomeId;

    fn parent(&self) -> Option<RecurringIncomeId> {
        self.recurring_id
    }
}
