//! Reconciled period rendering

use super::{format_row, DisplayRow, DisplayStyle};
use crate::reports::{PeriodSummary, ReconciliationTotals};

/// Render each period with its anchor, extra income, items and remainder
pub fn format_periods<P, S>(periods: &[PeriodSummary<P, S>], style: &DisplayStyle) -> String
where
    P: DisplayRow,
    S: DisplayRow,
{
    if periods.is_empty() {
        return "No pay periods. Add a paycheck or salary income first.\n".to_string();
    }

    let mut output = String::new();
    for period in periods {
        let end = match period.period_end {
            Some(end) => format!("before {}", style.date(end)),
            None => "onward".to_string(),
        };
        output.push_str(&format!(
            "Period {} {} ({}, {})\n",
            style.date(period.period_start),
            end,
            period.anchor.label(),
            style.money(period.anchor.amount())
        ));

        for extra in &period.additional_income {
            output.push_str(&format!("  + {}\n", format_row(extra, style, 0)));
        }
        if period.items.is_empty() {
            output.push_str("    (nothing due)\n");
        }
        for item in &period.items {
            output.push_str(&format_row(item, style, 4));
            output.push('\n');
        }

        output.push_str(&format!(
            "  Income {}  Due {}  Remaining {}\n\n",
            style.money(period.income_total),
            style.money(period.secondary_total),
            style.money(period.remaining)
        ));
    }

    let totals = ReconciliationTotals::of(periods);
    output.push_str(&format!(
        "{} periods  Income {}  Due {}  Remaining {}\n",
        totals.periods,
        style.money(totals.income_total),
        style.money(totals.secondary_total),
        style.money(totals.remaining)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bill, Money, Paycheck};
    use crate::reports::reconcile;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_format_periods() {
        let paychecks = vec![
            Paycheck::new("Acme", Money::from_units(2000), date(5)),
            Paycheck::new("Acme", Money::from_units(2000), date(19)),
        ];
        let bills = vec![Bill::new("Rent", Money::from_units(500), date(10))];
        let text = format_periods(&reconcile(&paychecks, &bills), &DisplayStyle::default());

        assert!(text.contains("Period 2024-01-05 before 2024-01-19 (Acme, $2000.00)"));
        assert!(text.contains("Remaining $1500.00"));
        assert!(text.contains("Period 2024-01-19 onward"));
        assert!(text.contains("(nothing due)"));
        assert!(text.contains("2 periods"));
    }
}
