//! JSON export

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::Money;
use crate::reports::{grand_total, YearGroup};

pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Wrapper around an exported year/month tree
#[derive(Debug, Serialize)]
pub struct GroupedExport<'a, T> {
    pub schema_version: &'static str,
    pub app_version: &'static str,
    pub exported_at: DateTime<Utc>,
    pub dataset: &'a str,
    pub total_amount: Money,
    pub years: &'a [YearGroup<T>],
}

impl<'a, T> GroupedExport<'a, T> {
    pub fn new(groups: &'a [YearGroup<T>], dataset: &'a str) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            app_version: env!("CARGO_PKG_VERSION"),
            exported_at: Utc::now(),
            dataset,
            total_amount: grand_total(groups),
            years: groups,
        }
    }
}

pub fn export_grouped_json<T: Serialize, W: Write>(
    groups: &[YearGroup<T>],
    dataset: &str,
    writer: &mut W,
) -> BudgetResult<()> {
    let export = GroupedExport::new(groups, dataset);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))
}
