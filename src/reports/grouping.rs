//! Year → month grouping of dated entries

use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{DatedAmount, Money};

/// Month display names, 1-based; index 0 is unused
pub const MONTH_NAMES: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Display name for a 1-based month number, empty when out of range
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES.get(month as usize).copied().unwrap_or("")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGroup<T> {
    pub month: u32,
    pub month_name: &'static str,
    pub items: Vec<T>,
    pub total_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGroup<T> {
    pub year: i32,
    pub months: Vec<MonthGroup<T>>,
    pub total_amount: Money,
}

impl<T> YearGroup<T> {
    pub fn item_count(&self) -> usize {
        self.months.iter().map(|m| m.items.len()).sum()
    }
}

/// Group entries by year, then month, both ascending
///
/// Items inside a month are ordered by date; entries on the same day keep
/// their input order.
pub fn group_by_year_month<T>(entries: &[T]) -> Vec<YearGroup<T>>
where
    T: DatedAmount + Clone,
{
    let mut by_year: BTreeMap<i32, BTreeMap<u32, Vec<T>>> = BTreeMap::new();
    for entry in entries {
        let date = entry.date();
        by_year
            .entry(date.year())
            .or_default()
            .entry(date.month())
            .or_default()
            .push(entry.clone());
    }

    by_year
        .into_iter()
        .map(|(year, months)| {
            let months: Vec<MonthGroup<T>> = months
                .into_iter()
                .map(|(month, mut items)| {
                    items.sort_by_key(|item| item.date());
                    MonthGroup {
                        month,
                        month_name: month_name(month),
                        total_amount: items.iter().map(DatedAmount::amount).sum(),
                        items,
                    }
                })
                .collect();
            YearGroup {
                year,
                total_amount: months.iter().map(|m| m.total_amount).sum(),
                months,
            }
        })
        .collect()
}

/// Sum of every year's total
pub fn grand_total<T>(groups: &[YearGroup<T>]) -> Money {
    groups.iter().map(|g| g.total_amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expense;
    use chrono::NaiveDate;

    fn expense(name: &str, y: i32, m: u32, d: u32, cents: i64) -> Expense {
        Expense::new(
            name,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
    }

    #[test]
    fn test_groups_sorted_with_totals() {
        let entries = vec![
            expense("c", 2025, 1, 3, 100),
            expense("b", 2024, 3, 20, 250),
            expense("a", 2024, 3, 2, 750),
            expense("d", 2024, 1, 15, 4_000),
        ];

        let groups = group_by_year_month(&entries);
        assert_eq!(groups.len(), 2);

        let y2024 = &groups[0];
        assert_eq!(y2024.year, 2024);
        assert_eq!(y2024.months.len(), 2);
        assert_eq!(y2024.months[0].month_name, "January");
        assert_eq!(y2024.months[1].month, 3);
        assert_eq!(y2024.months[1].month_name, "March");
        assert_eq!(y2024.months[1].items[0].name, "a");
        assert_eq!(y2024.months[1].total_amount, Money::from_cents(1_000));
        assert_eq!(y2024.total_amount, Money::from_cents(5_000));
        assert_eq!(y2024.item_count(), 3);

        assert_eq!(groups[1].year, 2025);
        assert_eq!(grand_total(&groups), Money::from_cents(5_100));
    }

    #[test]
    fn test_same_day_keeps_input_order() {
        let entries = vec![expense("first", 2024, 5, 1, 1), expense("second", 2024, 5, 1, 1)];
        let groups = group_by_year_month(&entries);
        let names: Vec<_> = groups[0].months[0].items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_year_month::<Expense>(&[]).is_empty());
    }
}
