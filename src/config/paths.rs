//! Path management for budget-insight
//!
//! ## Settings file resolution order
//!
//! 1. `--config` flag
//! 2. `BUDGET_INSIGHT_CONFIG` environment variable (if set)
//! 3. Platform config directory: `~/.config/budget-insight/settings.json` on
//!    Linux, the equivalent `ProjectDirs` location elsewhere
//!
//! Chart artifacts go into a single output directory chosen by the caller.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::InsightError;

/// Environment variable overriding the settings file location
pub const CONFIG_ENV_VAR: &str = "BUDGET_INSIGHT_CONFIG";

/// File name of the combined static chart image
pub const STATIC_CHART_FILE: &str = "spending_charts.png";

/// File name of the interactive dashboard
pub const DASHBOARD_FILE: &str = "dashboard.html";

/// Resolve the settings file path
///
/// Returns `None` when no explicit path is given and the platform has no
/// home directory; callers then run on defaults.
pub fn settings_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(custom) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(custom));
    }
    ProjectDirs::from("", "", "budget-insight").map(|dirs| dirs.config_dir().join("settings.json"))
}

/// Locations of generated chart artifacts
#[derive(Debug, Clone)]
pub struct ChartPaths {
    /// Directory all artifacts are written to
    output_dir: PathBuf,
}

impl ChartPaths {
    /// Create ChartPaths rooted at the given directory
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Get the output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path to the static chart image
    pub fn static_chart(&self) -> PathBuf {
        self.output_dir.join(STATIC_CHART_FILE)
    }

    /// Path to the interactive dashboard
    pub fn dashboard(&self) -> PathBuf {
        self.output_dir.join(DASHBOARD_FILE)
    }

    /// Ensure the output directory exists
    pub fn ensure_directories(&self) -> Result<(), InsightError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            InsightError::Io(format!(
                "Failed to create chart directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })
    }
}
