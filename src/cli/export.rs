//! CLI command for exporting grouped listings

use clap::{Args, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::export::{export_grouped, CsvRecord, ExportFormat};
use crate::reports::YearGroup;
use crate::services::{BillService, ExpenseService, IncomeService};
use crate::storage::Storage;

/// Which collection to export
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportTarget {
    Expenses,
    Incomes,
    Bills,
}

impl ExportTarget {
    fn dataset(&self) -> &'static str {
        match self {
            Self::Expenses => "expenses",
            Self::Incomes => "incomes",
            Self::Bills => "bills",
        }
    }
}

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// What to export
    #[arg(value_enum)]
    pub target: ExportTarget,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    args: ExportArgs,
) -> BudgetResult<()> {
    match args.target {
        ExportTarget::Expenses => {
            let groups = ExpenseService::new(storage, clock)
                .with_settings(settings)
                .list_grouped()?;
            write_export(&groups, &args)
        }
        ExportTarget::Incomes => {
            let groups = IncomeService::new(storage, clock)
                .with_settings(settings)
                .list_grouped()?;
            write_export(&groups, &args)
        }
        ExportTarget::Bills => {
            let groups = BillService::new(storage, clock).list_grouped()?;
            write_export(&groups, &args)
        }
    }
}

fn write_export<T>(groups: &[YearGroup<T>], args: &ExportArgs) -> BudgetResult<()>
where
    T: CsvRecord + Serialize,
{
    let dataset = args.target.dataset();

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(create_file(path)?);
            export_grouped(groups, dataset, args.format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| BudgetError::Export(e.to_string()))?;

            let count: usize = groups.iter().map(|g| g.item_count()).sum();
            println!(
                "Exported {} {} as {} to: {}",
                count,
                dataset,
                args.format,
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export_grouped(groups, dataset, args.format, &mut writer)?;
        }
    }

    Ok(())
}

fn create_file(path: &Path) -> BudgetResult<File> {
    File::create(path).map_err(|e| {
        BudgetError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })
}
