//! User settings for budget-insight
//!
//! Every field has a default matching the tool's out-of-the-box behavior,
//! so running without a settings file analyzes `sample_expenses.csv` and
//! writes charts to `charts/`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::InsightError;

/// User settings for budget-insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// CSV file analyzed when no input path is given
    #[serde(default = "default_input_file")]
    pub input_file: PathBuf,

    /// Directory chart artifacts are written to
    #[serde(default = "default_charts_dir")]
    pub charts_dir: PathBuf,

    /// Currency symbol used in the report and charts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Primary date format (strftime); common fallbacks are always tried
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Slope magnitude (currency units per month) above which a trend is
    /// reported as "strong". Not normalized against spend size.
    #[serde(default = "default_strong_trend_threshold")]
    pub strong_trend_threshold: f64,

    /// Multiplier on the residual standard deviation for the forecast band
    #[serde(default = "default_confidence_z")]
    pub confidence_z: f64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_input_file() -> PathBuf {
    PathBuf::from("sample_expenses.csv")
}

fn default_charts_dir() -> PathBuf {
    PathBuf::from("charts")
}

fn default_currency() -> String {
    "£".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_strong_trend_threshold() -> f64 {
    10.0
}

fn default_confidence_z() -> f64 {
    1.96
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            input_file: default_input_file(),
            charts_dir: default_charts_dir(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            strong_trend_threshold: default_strong_trend_threshold(),
            confidence_z: default_confidence_z(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_default(path: &Path) -> Result<Self, InsightError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            InsightError::Io(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            InsightError::Config(format!(
                "Failed to parse settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        settings.validate()?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, path: &Path) -> Result<(), InsightError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                InsightError::Io(format!("Failed to create settings directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| InsightError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| InsightError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values the analysis cannot work with
    pub fn validate(&self) -> Result<(), InsightError> {
        if !self.strong_trend_threshold.is_finite() || self.strong_trend_threshold < 0.0 {
            return Err(InsightError::Validation(format!(
                "strong_trend_threshold must be a non-negative number, got {}",
                self.strong_trend_threshold
            )));
        }
        if !self.confidence_z.is_finite() || self.confidence_z <= 0.0 {
            return Err(InsightError::Validation(format!(
                "confidence_z must be positive, got {}",
                self.confidence_z
            )));
        }
        if self.date_format.trim().is_empty() {
            return Err(InsightError::Validation("date_format must not be empty".into()));
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
        assert_eq!(settings.input_file, PathBuf::from("sample_expenses.csv"));
        assert_eq!(settings.charts_dir, PathBuf::from("charts"));
        assert_eq!(settings.currency_symbol, "£");
        assert_eq!(settings.strong_trend_threshold, 10.0);
        assert_eq!(settings.confidence_z, 1.96);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_or_default(&temp_dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.currency_symbol = "$".into();
        settings.strong_trend_threshold = 25.0;
        settings.save(&path).unwrap();

        let loaded = Settings::load_or_default(&path).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.strong_trend_threshold, 25.0);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "charts_dir": "out" }"#).unwrap();

        let loaded = Settings::load_or_default(&path).unwrap();
        assert_eq!(loaded.charts_dir, PathBuf::from("out"));
        assert_eq!(loaded.currency_symbol, "£");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        let err = Settings::load_or_default(&path).unwrap_err();
        assert!(matches!(err, InsightError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_bad_band() {
        let settings = Settings {
            confidence_z: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(InsightError::Validation(_))
        ));
    }
}
