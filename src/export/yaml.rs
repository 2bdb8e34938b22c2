//! YAML export

use serde::Serialize;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::reports::YearGroup;

use super::json::GroupedExport;

pub fn export_grouped_yaml<T: Serialize, W: Write>(
    groups: &[YearGroup<T>],
    dataset: &str,
    writer: &mut W,
) -> BudgetResult<()> {
    let export = GroupedExport::new(groups, dataset);

    writeln!(writer, "# payperiod export: {}", dataset)
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .map_err(|e| BudgetError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BudgetError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Income, Money};
    use crate::reports::group_by_year_month;
    use chrono::NaiveDate;

    #[test]
    fn test_yaml_export() {
        let incomes = vec![Income::new(
            "salary",
            Money::from_units(2000),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )];
        let mut out = Vec::new();
        export_grouped_yaml(&group_by_year_month(&incomes), "incomes", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("# payperiod export: incomes"));
        assert!(text.contains("month_name: January"));
        assert!(text.contains("source: salary"));
    }
}
