//! Chart rendering
//!
//! Renderers consume the two aggregates only. The static view is a PNG
//! image; the interactive view is an HTML dashboard. Each artifact is written
//! independently so one failed write does not prevent the others; the caller
//! decides what to do with failures (the CLI logs them and carries on).

pub mod html;
pub mod raster;
pub mod svg;

use std::path::PathBuf;

use tracing::info;

use crate::config::ChartPaths;
use crate::error::{InsightError, InsightResult};
use crate::services::{CategoryTotals, MonthlyTotals};

use self::svg::ChartStyle;

/// Produces chart artifacts from the aggregates
pub trait ChartRenderer {
    /// Render every artifact, returning one result per artifact
    fn render(
        &self,
        categories: &CategoryTotals,
        monthly: &MonthlyTotals,
    ) -> Vec<InsightResult<PathBuf>>;
}

/// Writes a static PNG and an interactive HTML dashboard to a directory
#[derive(Debug, Clone)]
pub struct FileChartRenderer {
    paths: ChartPaths,
    currency: String,
}

impl FileChartRenderer {
    pub fn new(paths: ChartPaths, currency: impl Into<String>) -> Self {
        Self {
            paths,
            currency: currency.into(),
        }
    }

    fn write_artifact(&self, path: PathBuf, contents: &[u8]) -> InsightResult<PathBuf> {
        std::fs::write(&path, contents).map_err(|e| {
            InsightError::Chart(format!("Failed to write {}: {}", path.display(), e))
        })?;
        info!(path = %path.display(), bytes = contents.len(), "wrote chart");
        Ok(path)
    }
}

impl ChartRenderer for FileChartRenderer {
    fn render(
        &self,
        categories: &CategoryTotals,
        monthly: &MonthlyTotals,
    ) -> Vec<InsightResult<PathBuf>> {
        if let Err(e) = self.paths.ensure_directories() {
            let message = e.to_string();
            return vec![
                Err(InsightError::Chart(message.clone())),
                Err(InsightError::Chart(message)),
            ];
        }

        let drawing =
            svg::static_document(categories, monthly, &ChartStyle::static_image(&self.currency));
        let static_result = raster::svg_to_png(&drawing)
            .and_then(|png| self.write_artifact(self.paths.static_chart(), &png));

        let dashboard_result = html::dashboard_document(categories, monthly, &self.currency)
            .and_then(|page| self.write_artifact(self.paths.dashboard(), page.as_bytes()));

        vec![static_result, dashboard_result]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Transaction};
    use crate::services::{totals_by_category, totals_by_month};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn aggregates() -> (CategoryTotals, MonthlyTotals) {
        let txns = vec![
            Transaction::new(
                NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                "Food",
                Money::from_cents(1000),
            ),
            Transaction::new(
                NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
                "Rent",
                Money::from_cents(3000),
            ),
        ];
        (totals_by_category(&txns), totals_by_month(&txns))
    }

    #[test]
    fn test_render_writes_both_artifacts() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ChartPaths::new(temp_dir.path().join("charts"));
        let renderer = FileChartRenderer::new(paths.clone(), "£");
        let (categories, monthly) = aggregates();

        let results = renderer.render(&categories, &monthly);
        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(result.as_ref().unwrap().exists());
        }

        let png = std::fs::read(paths.static_chart()).unwrap();
        assert!(png.starts_with(b"\x89PNG"));
        let html = std::fs::read_to_string(paths.dashboard()).unwrap();
        assert!(html.contains("<html>"));
    }

    #[test]
    fn test_render_failure_is_reported_not_panicking() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the output directory should be
        let blocker = temp_dir.path().join("charts");
        std::fs::write(&blocker, "not a directory").unwrap();

        let renderer = FileChartRenderer::new(ChartPaths::new(&blocker), "£");
        let (categories, monthly) = aggregates();

        let results = renderer.render(&categories, &monthly);
        assert_eq!(results.len(), 2);
        assert!(results
            .iter()
            .all(|r| matches!(r, Err(InsightError::Chart(_)))));
    }
}
