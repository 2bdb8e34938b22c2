//! Export of grouped listings
//!
//! - CSV: one row per entry with its year and month, spreadsheet-friendly
//! - JSON: the full year/month tree with totals
//! - YAML: the same tree, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_grouped_csv, CsvRecord, CsvRow};
pub use self::json::{export_grouped_json, GroupedExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_grouped_yaml;

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::{BudgetError, BudgetResult};
use crate::reports::YearGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One row per entry
    Csv,
    /// Year/month tree with totals
    Json,
    /// Year/month tree, human-readable
    Yaml,
}

impl FromStr for ExportFormat {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(BudgetError::Export(format!("Unknown export format: {}", other))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        })
    }
}

/// Write `groups` in `format`; `dataset` names the collection in the output
pub fn export_grouped<T, W>(
    groups: &[YearGroup<T>],
    dataset: &str,
    format: ExportFormat,
    writer: &mut W,
) -> BudgetResult<()>
where
    T: CsvRecord + Serialize,
    W: Write,
{
    match format {
        ExportFormat::Csv => export_grouped_csv(groups, writer),
        ExportFormat::Json => export_grouped_json(groups, dataset, writer),
        ExportFormat::Yaml => export_grouped_yaml(groups, dataset, writer),
    }
}
