//! Reports for payperiod
//!
//! Period reconciliation (money remaining between paydays) and the
//! year/month grouping used by every list view.

pub mod grouping;
pub mod periods;

pub use grouping::{group_by_year_month, grand_total, month_name, MonthGroup, YearGroup, MONTH_NAMES};
pub use periods::{reconcile, reconcile_periods, PeriodSummary, ReconciliationTotals};
