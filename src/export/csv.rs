//! CSV export

use serde::Serialize;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Bill, EntryKind, Expense, Income, Money};
use crate::reports::YearGroup;

/// One exported line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvRow {
    pub year: i32,
    pub month: String,
    pub date: String,
    pub id: String,
    pub name: String,
    pub description: String,
    pub amount: String,
    pub settled: bool,
    pub kind: String,
}

/// Entries that can be flattened to a [`CsvRow`]
pub trait CsvRecord {
    fn csv_row(&self, year: i32, month: &str) -> CsvRow;
}

fn amount_column(amount: Money) -> String {
    format!("{:.2}", amount.as_units_f64())
}

impl CsvRecord for Expense {
    fn csv_row(&self, year: i32, month: &str) -> CsvRow {
        CsvRow {
            year,
            month: month.to_string(),
            date: self.due_date.to_string(),
            id: self.id.as_uuid().to_string(),
            name: self.name.clone(),
            description: self.description.clone(),
            amount: amount_column(self.amount),
            settled: self.paid,
            kind: self.kind.to_string(),
        }
    }
}

impl CsvRecord for Income {
    fn csv_row(&self, year: i32, month: &str) -> CsvRow {
        CsvRow {
            year,
            month: month.to_string(),
            date: self.received_date.to_string(),
            id: self.id.as_uuid().to_string(),
            name: self.source.clone(),
            description: self.description.clone(),
            amount: amount_column(self.amount),
            settled: self.received,
            kind: self.kind.to_string(),
        }
    }
}

impl CsvRecord for Bill {
    fn csv_row(&self, year: i32, month: &str) -> CsvRow {
        CsvRow {
            year,
            month: month.to_string(),
            date: self.due_date.to_string(),
            id: self.id.as_uuid().to_string(),
            name: self.name.clone(),
            description: String::new(),
            amount: amount_column(self.amount),
            settled: self.paid,
            kind: EntryKind::OneTime.to_string(),
        }
    }
}

/// Write every entry of `groups` as a CSV row, header first
pub fn export_grouped_csv<T: CsvRecord, W: Write>(
    groups: &[YearGroup<T>],
    writer: &mut W,
) -> BudgetResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for year in groups {
        for month in &year.months {
            for item in &month.items {
                csv_writer
                    .serialize(item.csv_row(year.year, month.month_name))
                    .map_err(|e| BudgetError::Export(e.to_string()))?;
            }
        }
    }
    csv_writer
        .flush()
        .map_err(|e| BudgetError::Export(e.to_string()))
}
