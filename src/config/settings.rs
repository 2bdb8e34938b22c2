//! User settings for payperiod
//!
//! Display preferences, the expansion safety cap, and which income source
//! anchors a salary period.

use serde::{Deserialize, Serialize};

use super::paths::PayPaths;
use crate::error::BudgetError;

/// Hard cap on the number of instances a single expansion may produce
pub const DEFAULT_MAX_GENERATED_INSTANCES: usize = 1000;

/// User settings for payperiod
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Maximum number of instances one recurrence expansion may generate
    #[serde(default = "default_max_generated_instances")]
    pub max_generated_instances: usize,

    /// Income source that anchors a salary period
    #[serde(default = "default_salary_source")]
    pub salary_source: String,

    /// Tracing filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_max_generated_instances() -> usize {
    DEFAULT_MAX_GENERATED_INSTANCES
}

fn default_salary_source() -> String {
    "salary".to_string()
}

fn default_log_filter() -> String {
    "payperiod=warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            max_generated_instances: default_max_generated_instances(),
            salary_source: default_salary_source(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PayPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PayPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings that would make expansion or reconciliation meaningless
    pub fn validate(&self) -> Result<(), BudgetError> {
        if self.max_generated_instances == 0 {
            return Err(BudgetError::Config(
                "max_generated_instances must be at least 1".into(),
            ));
        }
        if self.salary_source.trim().is_empty() {
            return Err(BudgetError::Config("salary_source cannot be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.max_generated_instances, 1000);
        assert_eq!(settings.salary_source, "salary");
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.salary_source = "Paycheck".into();
        settings.max_generated_instances = 250;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.salary_source, "Paycheck");
        assert_eq!(loaded.max_generated_instances, 250);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.max_generated_instances, 1000);
        assert_eq!(settings.log_filter, "payperiod=warn");
    }

    #[test]
    fn test_zero_cap_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"max_generated_instances": 0}"#).unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(BudgetError::Config(_))
        ));
    }
}
