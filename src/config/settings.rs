//! User settings for Quokka
//!
//! Holds the application-wide values the backend normally hands out through
//! its settings resource: the minimum billable time unit and the currency
//! unit. Also carries the timezone offset used when formatting dates for the
//! API and the validation reporting mode.

use chrono::{FixedOffset, Local, Offset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::paths::QuokkaPaths;
use crate::error::QuokkaError;

/// User settings for Quokka
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Smallest billable time unit in hours (0.25 = 15 minutes)
    #[serde(default = "default_accounting_min_amount")]
    pub accounting_min_amount: Decimal,

    /// Currency unit shown next to material amounts
    #[serde(default = "default_currency_unit")]
    pub currency_unit: String,

    /// Fixed UTC offset in minutes for API dates; `None` uses the system offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,

    /// Report failures of every rule group instead of stopping at the first
    #[serde(default)]
    pub accumulate_validation_errors: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_accounting_min_amount() -> Decimal {
    Decimal::new(25, 2)
}

fn default_currency_unit() -> String {
    "€".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            accounting_min_amount: default_accounting_min_amount(),
            currency_unit: default_currency_unit(),
            utc_offset_minutes: None,
            accumulate_validation_errors: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &QuokkaPaths) -> Result<Self, QuokkaError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| QuokkaError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                QuokkaError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &QuokkaPaths) -> Result<(), QuokkaError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| QuokkaError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| QuokkaError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check the values the reconciliation rules depend on
    pub fn validate(&self) -> Result<(), QuokkaError> {
        if self.accounting_min_amount <= Decimal::ZERO {
            return Err(QuokkaError::Config(format!(
                "accounting_min_amount must be positive, got {}",
                self.accounting_min_amount
            )));
        }

        if let Some(minutes) = self.utc_offset_minutes {
            if FixedOffset::east_opt(minutes * 60).is_none() {
                return Err(QuokkaError::Config(format!(
                    "utc_offset_minutes out of range: {}",
                    minutes
                )));
            }
        }

        Ok(())
    }

    /// The offset API dates and times are corrected to
    pub fn timezone(&self) -> FixedOffset {
        self.utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
            .unwrap_or_else(|| Local::now().offset().fix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.accounting_min_amount, Decimal::new(25, 2));
        assert_eq!(settings.currency_unit, "€");
        assert!(settings.utc_offset_minutes.is_none());
        assert!(!settings.accumulate_validation_errors);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuokkaPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.accounting_min_amount = Decimal::new(5, 1);
        settings.utc_offset_minutes = Some(120);

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuokkaPaths::with_base_dir(temp_dir.path().to_path_buf());

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, Settings::default());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_min_amount_accepts_json_number() {
        let settings: Settings =
            serde_json::from_str(r#"{"accounting_min_amount": 0.5}"#).unwrap();
        assert_eq!(settings.accounting_min_amount, Decimal::new(5, 1));
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_rejects_non_positive_min_amount() {
        let mut settings = Settings::default();
        settings.accounting_min_amount = Decimal::ZERO;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_fixed_timezone() {
        let mut settings = Settings::default();
        settings.utc_offset_minutes = Some(-90);
        assert_eq!(settings.timezone().local_minus_utc(), -90 * 60);
    }
}
