//! Year/month listings

use super::{format_row, DisplayRow, DisplayStyle};
use crate::reports::{grand_total, YearGroup};

pub fn format_year_groups<T: DisplayRow>(
    groups: &[YearGroup<T>],
    style: &DisplayStyle,
    empty_message: &str,
) -> String {
    if groups.is_empty() {
        return format!("{}\n", empty_message);
    }

    let mut output = String::new();
    for year in groups {
        output.push_str(&format!(
            "{:<66} {:>12}\n",
            year.year,
            style.money(year.total_amount)
        ));
        for month in &year.months {
            output.push_str(&format!(
                "  {:<64} {:>12}\n",
                month.month_name,
                style.money(month.total_amount)
            ));
            for item in &month.items {
                output.push_str(&format_row(item, style, 4));
                output.push('\n');
            }
        }
    }
    output.push_str(&"-".repeat(79));
    output.push('\n');
    output.push_str(&format!(
        "{:<66} {:>12}\n",
        "TOTAL",
        style.money(grand_total(groups))
    ));
    output
}

/// A flat list without grouping, e.g. overdue items
pub fn format_entry_list<T: DisplayRow>(entries: &[T], style: &DisplayStyle, empty_message: &str) -> String {
    if entries.is_empty() {
        return format!("{}\n", empty_message);
    }
    let mut output = String::new();
    for entry in entries {
        output.push_str(&format_row(entry, style, 0));
        output.push('\n');
    }
    output
}
