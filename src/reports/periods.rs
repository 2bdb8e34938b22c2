//! Period reconciliation
//!
//! Buckets a secondary stream (bills, expenses) into the half-open periods
//! `[anchor_i, anchor_{i+1})` formed by a primary stream (paychecks, salary
//! income). The last period has no upper bound.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{DatedAmount, Money};

/// One reconciled period, anchored on a primary-stream entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary<P, S> {
    /// The primary entry that opens this period
    pub anchor: P,
    pub period_start: NaiveDate,
    /// Exclusive upper bound; `None` for the final, open-ended period
    pub period_end: Option<NaiveDate>,
    /// Secondary entries dated within the period, ascending
    pub items: Vec<S>,
    pub secondary_total: Money,
    /// Non-anchor primary entries dated within the period
    pub additional_income: Vec<P>,
    pub additional_total: Money,
    /// Anchor amount plus additional income
    pub income_total: Money,
    /// `income_total - secondary_total`
    pub remaining: Money,
}

impl<P, S> PeriodSummary<P, S> {
    /// Whether `date` falls inside this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.period_start && self.period_end.map_or(true, |end| date < end)
    }

    pub fn is_open_ended(&self) -> bool {
        self.period_end.is_none()
    }
}

/// Reconcile with every primary entry acting as a period anchor
pub fn reconcile<P, S>(primary: &[P], secondary: &[S]) -> Vec<PeriodSummary<P, S>>
where
    P: DatedAmount + Clone,
    S: DatedAmount + Clone,
{
    reconcile_periods(primary, secondary, |_| true)
}

/// Reconcile `secondary` against the periods opened by the primary entries
/// selected by `is_anchor`.
///
/// Inputs need not be sorted. Entries sharing a date keep their input order.
/// Non-anchor primaries dated before the first anchor are not reported.
pub fn reconcile_periods<P, S, F>(
    primary: &[P],
    secondary: &[S],
    is_anchor: F,
) -> Vec<PeriodSummary<P, S>>
where
    P: DatedAmount + Clone,
    S: DatedAmount + Clone,
    F: Fn(&P) -> bool,
{
    let mut primary: Vec<&P> = primary.iter().collect();
    primary.sort_by_key(|p| p.date());
    let mut secondary: Vec<&S> = secondary.iter().collect();
    secondary.sort_by_key(|s| s.date());

    let (anchors, others): (Vec<&P>, Vec<&P>) = primary.into_iter().partition(|p| is_anchor(*p));

    anchors
        .iter()
        .enumerate()
        .map(|(i, anchor)| {
            let period_start = anchor.date();
            let period_end = anchors.get(i + 1).map(|next| next.date());

            let items: Vec<S> = within(&secondary, period_start, period_end)
                .iter()
                .map(|s| (*s).clone())
                .collect();
            let additional_income: Vec<P> = within(&others, period_start, period_end)
                .iter()
                .map(|p| (*p).clone())
                .collect();

            let secondary_total: Money = items.iter().map(DatedAmount::amount).sum();
            let additional_total: Money = additional_income.iter().map(DatedAmount::amount).sum();
            let income_total = anchor.amount() + additional_total;

            PeriodSummary {
                anchor: (*anchor).clone(),
                period_start,
                period_end,
                items,
                secondary_total,
                additional_income,
                additional_total,
                income_total,
                remaining: income_total - secondary_total,
            }
        })
        .collect()
}

/// The slice of date-sorted `entries` with `start <= date < end`
fn within<'s, T: DatedAmount>(
    entries: &'s [&'s T],
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> &'s [&'s T] {
    let lo = entries.partition_point(|e| e.date() < start);
    let hi = match end {
        Some(end) => entries.partition_point(|e| e.date() < end),
        None => entries.len(),
    };
    &entries[lo..hi.max(lo)]
}

/// Totals across a whole reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconciliationTotals {
    pub periods: usize,
    pub income_total: Money,
    pub secondary_total: Money,
    pub remaining: Money,
}

impl ReconciliationTotals {
    pub fn of<P, S>(summaries: &[PeriodSummary<P, S>]) -> Self {
        Self {
            periods: summaries.len(),
            income_total: summaries.iter().map(|s| s.income_total).sum(),
            secondary_total: summaries.iter().map(|s| s.secondary_total).sum(),
            remaining: summaries.iter().map(|s| s.remaining).sum(),
        }
    }
}
