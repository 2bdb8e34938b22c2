//! Recurring definition listings

use super::{truncate, DisplayStyle};
use crate::models::{Money, RecurrenceRule, RecurringExpense, RecurringIncome};

fn format_definition(
    id: String,
    label: &str,
    amount: Money,
    rule: &RecurrenceRule,
    style: &DisplayStyle,
) -> String {
    format!(
        "{:12}  {:24} {:>12}  {}\n",
        id,
        truncate(label, 24),
        style.money(amount),
        rule.describe()
    )
}

pub fn format_recurring_expenses(definitions: &[RecurringExpense], style: &DisplayStyle) -> String {
    if definitions.is_empty() {
        return "No recurring expenses.\n".to_string();
    }
    definitions
        .iter()
        .map(|d| format_definition(d.id.to_string(), &d.name, d.amount, &d.rule, style))
        .collect()
}

pub fn format_recurring_incomes(definitions: &[RecurringIncome], style: &DisplayStyle) -> String {
    if definitions.is_empty() {
        return "No recurring income.\n".to_string();
    }
    definitions
        .iter()
        .map(|d| format_definition(d.id.to_string(), &d.source, d.amount, &d.rule, style))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use chrono::NaiveDate;

    #[test]
    fn test_lists_rule() {
        let rule = RecurrenceRule::bounded(
            Frequency::Weekly,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        );
        let gym = RecurringExpense::new("Gym", Money::from_units(40), rule);
        let text = format_recurring_expenses(&[gym], &DisplayStyle::default());
        assert!(text.contains("Gym"));
        assert!(text.contains("$40.00"));
        assert!(text.contains("2024-01-01"));
    }
}
