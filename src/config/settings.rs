//! User settings for spendscope
//!
//! Manages user preferences: the default period granularity, how income is
//! told apart from expenses, page size, and display formats.

use serde::{Deserialize, Serialize};

use super::paths::SpendscopePaths;
use crate::error::SpendscopeError;
use crate::models::{Classification, Granularity};
use crate::services::pagination::PAGE_SIZES;

/// User settings for spendscope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Granularity used when a view does not name one
    #[serde(default)]
    pub default_granularity: Granularity,

    /// Income/expense classification strategy
    #[serde(default)]
    pub classification: Classification,

    /// Rows per page in the transaction register (10, 20, 50 or 100)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format tried first when reading source files (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_page_size() -> usize {
    20
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%m/%d/%Y".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_granularity: Granularity::default(),
            classification: Classification::default(),
            page_size: default_page_size(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SpendscopePaths) -> Result<Self, SpendscopeError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SpendscopeError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SpendscopeError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendscopePaths) -> Result<(), SpendscopeError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SpendscopeError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            SpendscopeError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Check that every setting holds a usable value
    pub fn validate(&self) -> Result<(), SpendscopeError> {
        if !PAGE_SIZES.contains(&self.page_size) {
            return Err(SpendscopeError::Config(format!(
                "page_size must be one of {:?}, got {}",
                PAGE_SIZES, self.page_size
            )));
        }
        if self.date_format.trim().is_empty() {
            return Err(SpendscopeError::Config("date_format must not be empty".into()));
        }
        Ok(())
    }
}
