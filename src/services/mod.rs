//! Service layer for payperiod
//!
//! Validation, expansion and auditing on top of the storage layer. Every
//! service borrows the shared [`Storage`](crate::storage::Storage).

pub mod bill;
pub mod drafts;
pub mod expense;
pub mod income;
pub mod paycheck;

pub use bill::BillService;
pub use drafts::{InstanceChanges, RecurringChanges, RecurringDraft};
pub use expense::{ExpenseService, RecurringExpenseOutcome};
pub use income::{IncomePeriod, IncomeService, RecurringIncomeOutcome};
pub use paycheck::{PayPeriod, PaycheckService};
