//! Frequency calendar: advance a UTC calendar day by one frequency step
//!
//! All arithmetic happens on `NaiveDate` values that represent UTC midnight.
//! Boundary inputs (RFC 3339 instants) are truncated to their UTC day first.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, Utc};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Frequency, FrequencyDomain};

/// The day-of-month (and month, for yearly rules) a recurrence keeps returning to
///
/// Taken from the rule's start date, never from the current cursor, so a
/// clamp into a short month does not shift later occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub month: u32,
    pub day: u32,
}

impl Anchor {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

/// Step function for one frequency
pub type AdvanceFn = fn(NaiveDate, Anchor) -> Option<NaiveDate>;

/// Frequency code → step function, restricted to one domain
#[derive(Debug, Clone, Copy)]
pub struct FrequencyTable {
    domain: FrequencyDomain,
    rules: &'static [(Frequency, AdvanceFn)],
}

const EXPENSE_RULES: &[(Frequency, AdvanceFn)] = &[
    (Frequency::Daily, step_daily),
    (Frequency::Weekly, step_weekly),
    (Frequency::Monthly, step_monthly),
    (Frequency::Yearly, step_yearly),
];

const INCOME_RULES: &[(Frequency, AdvanceFn)] = &[
    (Frequency::Daily, step_daily),
    (Frequency::Weekly, step_weekly),
    (Frequency::BiWeekly, step_bi_weekly),
    (Frequency::Monthly, step_monthly),
    (Frequency::SemiMonthly, step_semi_monthly),
    (Frequency::Yearly, step_yearly),
];

impl FrequencyTable {
    pub const EXPENSE: FrequencyTable = FrequencyTable {
        domain: FrequencyDomain::Expense,
        rules: EXPENSE_RULES,
    };

    pub const INCOME: FrequencyTable = FrequencyTable {
        domain: FrequencyDomain::Income,
        rules: INCOME_RULES,
    };

    pub fn for_domain(domain: FrequencyDomain) -> Self {
        match domain {
            FrequencyDomain::Expense => Self::EXPENSE,
            FrequencyDomain::Income => Self::INCOME,
        }
    }

    pub fn domain(&self) -> FrequencyDomain {
        self.domain
    }

    /// Look up the step function for a frequency
    pub fn rule(&self, frequency: Frequency) -> BudgetResult<AdvanceFn> {
        self.rules
            .iter()
            .find(|(f, _)| *f == frequency)
            .map(|(_, step)| *step)
            .ok_or_else(|| BudgetError::UnsupportedFrequency {
                frequency: frequency.code().to_string(),
                domain: self.domain.name(),
            })
    }

    /// Advance `date` by one step of `frequency`
    pub fn advance(
        &self,
        date: NaiveDate,
        frequency: Frequency,
        anchor: Anchor,
    ) -> BudgetResult<NaiveDate> {
        let step = self.rule(frequency)?;
        step(date, anchor).ok_or_else(|| out_of_range(date))
    }

    /// Advance by a frequency given as its wire code
    pub fn advance_code(
        &self,
        date: NaiveDate,
        code: &str,
        anchor: Anchor,
    ) -> BudgetResult<NaiveDate> {
        let frequency: Frequency = code.parse()?;
        self.advance(date, frequency, anchor)
    }
}

/// Advance `date` by one step, with no domain restriction, anchored on `date` itself
pub fn advance(date: NaiveDate, frequency: Frequency) -> BudgetResult<NaiveDate> {
    FrequencyTable::INCOME.advance(date, frequency, Anchor::of(date))
}

fn out_of_range(date: NaiveDate) -> BudgetError {
    BudgetError::Validation(format!("date arithmetic overflowed after {}", date))
}

fn step_daily(date: NaiveDate, _anchor: Anchor) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(1))
}

fn step_weekly(date: NaiveDate, _anchor: Anchor) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(7))
}

fn step_bi_weekly(date: NaiveDate, _anchor: Anchor) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(14))
}

fn step_monthly(date: NaiveDate, anchor: Anchor) -> Option<NaiveDate> {
    let target = first_of_month(date)?.checked_add_months(Months::new(1))?;
    clamp_to_day(target, anchor.day)
}

/// The 1st moves to the 15th of the same month; any other day moves to the 1st of the next
fn step_semi_monthly(date: NaiveDate, _anchor: Anchor) -> Option<NaiveDate> {
    if date.day() == 1 {
        date.with_day(15)
    } else {
        first_of_month(date)?.checked_add_months(Months::new(1))
    }
}

fn step_yearly(date: NaiveDate, anchor: Anchor) -> Option<NaiveDate> {
    let target = NaiveDate::from_ymd_opt(date.year().checked_add(1)?, anchor.month, 1)?;
    clamp_to_day(target, anchor.day)
}

fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)
}

/// `first` is the 1st of the target month; pick `day` or the month's last day
fn clamp_to_day(first: NaiveDate, day: u32) -> Option<NaiveDate> {
    first.with_day(day.min(days_in_month(first)?))
}

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> Option<u32> {
    let first = first_of_month(date)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from((next - first).num_days()).ok()
}

/// Truncate an instant to its UTC calendar day
pub fn normalize(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// Parse a boundary date: `YYYY-MM-DD`, or an ISO-8601 date-time (converted to UTC)
pub fn parse_boundary_date(input: &str) -> BudgetResult<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(normalize(instant.with_timezone(&Utc)));
    }
    // Date-time without an offset is taken to already be UTC
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.date());
        }
    }

    Err(BudgetError::Validation(format!(
        "Invalid date '{}': expected YYYY-MM-DD or an ISO-8601 date-time",
        input
    )))
}
