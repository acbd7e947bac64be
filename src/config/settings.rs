//! User settings for StepUp
//!
//! Preferences for the default period granularity, history ordering,
//! logging and display.

use serde::{Deserialize, Serialize};

use super::paths::StepupPaths;
use crate::error::{SalesError, SalesResult};
use crate::models::{BucketOrder, Granularity};

/// User settings for StepUp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Granularity used when a command does not name one
    #[serde(default)]
    pub default_granularity: Granularity,

    /// Ordering of target history and bucket lists
    #[serde(default = "default_history_order")]
    pub history_order: BucketOrder,

    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Currency unit appended to amounts
    #[serde(default = "default_currency_unit")]
    pub currency_unit: String,

    /// How many months ahead the period pickers offer
    #[serde(default = "default_upcoming_months")]
    pub upcoming_months: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_history_order() -> BucketOrder {
    BucketOrder::MostRecentFirst
}

fn default_log_filter() -> String {
    "stepup_cli=info".to_string()
}

fn default_currency_unit() -> String {
    "원".to_string()
}

fn default_upcoming_months() -> u32 {
    12
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_granularity: Granularity::default(),
            history_order: default_history_order(),
            log_filter: default_log_filter(),
            currency_unit: default_currency_unit(),
            upcoming_months: default_upcoming_months(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &StepupPaths) -> SalesResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SalesError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| SalesError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &StepupPaths) -> SalesResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SalesError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SalesError::Io(format!("Failed to write settings file: {}", e)))
    }

    /// Format an amount with the configured unit
    pub fn format_amount(&self, amount: u64) -> String {
        format!("{}{}", group_thousands(amount), self.currency_unit)
    }
}

fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_granularity, Granularity::Month);
        assert_eq!(settings.history_order, BucketOrder::MostRecentFirst);
        assert_eq!(settings.upcoming_months, 12);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StepupPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            default_granularity: Granularity::Week,
            log_filter: "stepup_cli=debug".into(),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_granularity, Granularity::Week);
        assert_eq!(loaded.log_filter, "stepup_cli=debug");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"default_granularity":"day"}"#).unwrap();
        assert_eq!(settings.default_granularity, Granularity::Day);
        assert_eq!(settings.currency_unit, "원");
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StepupPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, SalesError::Config(_)));
    }

    #[test]
    fn test_format_amount() {
        let settings = Settings::default();
        assert_eq!(settings.format_amount(0), "0원");
        assert_eq!(settings.format_amount(300_000), "300,000원");
        assert_eq!(settings.format_amount(1_234_567), "1,234,567원");
    }
}
