//! Core data models for payperiod
//!
//! Expenses, income, bills and paychecks, the recurrence rules that generate
//! expense and income instances, and the money and ID types they share.

pub mod bill;
pub mod entry;
pub mod expense;
pub mod frequency;
pub mod ids;
pub mod income;
pub mod money;
pub mod recurrence;

pub use bill::{Bill, Paycheck};
pub use entry::{Dated, DatedAmount, EntryKind, EntryValidationError};
pub use expense::{Expense, RecurringExpense};
pub use frequency::{Frequency, FrequencyDomain};
pub use ids::{BillId, ExpenseId, IncomeId, PaycheckId, RecurringExpenseId, RecurringIncomeId};
pub use income::{Income, RecurringIncome};
pub use money::{Money, MoneyParseError};
pub use recurrence::RecurrenceRule;
