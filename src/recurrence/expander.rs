//! Recurrence expansion
//!
//! Turns a [`RecurrenceRule`] into the ordered list of dated instances it
//! implies. Income and expense definitions share this one code path; they
//! differ only in the [`FrequencyTable`] passed in and in the closure that
//! builds each instance.

use chrono::NaiveDate;
use tracing::debug;

use super::calendar::{Anchor, FrequencyTable};
use crate::clock::Clock;
use crate::config::settings::DEFAULT_MAX_GENERATED_INSTANCES;
use crate::error::{BudgetError, BudgetResult};
use crate::models::RecurrenceRule;

/// Knobs for one expansion
#[derive(Debug, Clone, Copy)]
pub struct ExpandOptions {
    /// Start generating at the first occurrence on or after today
    pub skip_past_dates: bool,
    /// Hard cap on the number of instances an open-ended rule may generate
    pub max_instances: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            skip_past_dates: false,
            max_instances: DEFAULT_MAX_GENERATED_INSTANCES,
        }
    }
}

impl ExpandOptions {
    pub fn skipping_past(mut self) -> Self {
        self.skip_past_dates = true;
        self
    }

    pub fn with_max_instances(mut self, max_instances: usize) -> Self {
        self.max_instances = max_instances;
        self
    }
}

/// Occurrence dates of `rule`, ascending
///
/// Fails with `InvalidDateRange` if the rule starts after it ends, with
/// `UnsupportedFrequency` if the table has no step for its frequency, and
/// with `TooManyInstances` if an open-ended rule would produce more than
/// `options.max_instances` dates. Nothing is returned on failure.
pub fn expand_dates(
    rule: &RecurrenceRule,
    table: &FrequencyTable,
    options: ExpandOptions,
    clock: &dyn Clock,
) -> BudgetResult<Vec<NaiveDate>> {
    rule.check_order()?;
    let step = table.rule(rule.frequency)?;
    let anchor = Anchor::of(rule.start_date);
    let advance = |cursor: NaiveDate| {
        step(cursor, anchor).ok_or_else(|| {
            BudgetError::Validation(format!("date arithmetic overflowed after {}", cursor))
        })
    };
    let past_end = |cursor: NaiveDate| rule.end_date.is_some_and(|end| cursor > end);

    let mut cursor = rule.start_date;

    if options.skip_past_dates {
        let today = clock.today();
        while cursor < today {
            cursor = advance(cursor)?;
            if past_end(cursor) {
                debug!(
                    frequency = %rule.frequency,
                    start = %rule.start_date,
                    %today,
                    "recurrence has no occurrences left to regenerate"
                );
                return Ok(Vec::new());
            }
        }
    }

    // Bounded rules always expand in full; only open-ended ones are capped
    let capped = rule.is_open_ended();
    let mut dates = Vec::new();
    while !past_end(cursor) {
        if capped && dates.len() >= options.max_instances {
            return Err(BudgetError::TooManyInstances {
                limit: options.max_instances,
            });
        }
        dates.push(cursor);
        cursor = advance(cursor)?;
    }

    debug!(
        frequency = %rule.frequency,
        start = %rule.start_date,
        count = dates.len(),
        skip_past_dates = options.skip_past_dates,
        "expanded recurrence"
    );
    Ok(dates)
}

/// Expand `rule` and build one instance per occurrence with `make`
///
/// All-or-nothing: `make` is only called once every date has been computed.
pub fn expand<T, F>(
    rule: &RecurrenceRule,
    table: &FrequencyTable,
    options: ExpandOptions,
    clock: &dyn Clock,
    make: F,
) -> BudgetResult<Vec<T>>
where
    F: FnMut(NaiveDate) -> T,
{
    let dates = expand_dates(rule, table, options, clock)?;
    Ok(dates.into_iter().map(make).collect())
}
