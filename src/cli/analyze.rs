//! CLI command handlers for the analysis pipeline
//!
//! Load → aggregate → {summary, charts, forecast}. Loading errors abort the
//! command; chart and forecast problems only degrade the output.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::charts::{ChartRenderer, FileChartRenderer};
use crate::config::{ChartPaths, Settings};
use crate::display::format_category_table;
use crate::error::{InsightError, InsightResult};
use crate::models::{MonthKey, Transaction};
use crate::reports::{format_forecast, format_trends, SummaryReport};
use crate::services::{
    analyze_trends, current_month_slice, totals_by_category, totals_by_month, CategoryTotals,
    ForecastOutcome, Forecaster, Loader, MonthlyTotals, OrdinaryLeastSquares,
};

/// Everything a command needs, resolved from flags and settings
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Effective settings (flags already applied)
    pub settings: Settings,
    /// CSV file to analyze
    pub input: PathBuf,
    /// Month treated as "current"
    pub reference_month: MonthKey,
    /// Skip chart rendering in the full analysis
    pub skip_charts: bool,
}

/// Loaded transactions and their aggregates
#[derive(Debug, Clone)]
pub struct Dataset {
    pub transactions: Vec<Transaction>,
    pub categories: CategoryTotals,
    pub monthly: MonthlyTotals,
}

impl Dataset {
    /// Load a file and aggregate it
    pub fn load(path: &Path, settings: &Settings) -> InsightResult<Self> {
        let transactions = Loader::new()
            .with_date_format(&settings.date_format)
            .load_path(path)?;
        Ok(Self::from_transactions(transactions))
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let categories = totals_by_category(&transactions);
        let monthly = totals_by_month(&transactions);
        Self {
            transactions,
            categories,
            monthly,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The summary report for a reference month
    pub fn summary(&self, reference_month: MonthKey) -> SummaryReport {
        SummaryReport::generate(
            &self.transactions,
            &self.categories,
            &self.monthly,
            &current_month_slice(&self.transactions, reference_month),
        )
    }

    /// The next-month forecast
    pub fn forecast(&self, settings: &Settings) -> ForecastOutcome {
        Forecaster::new(OrdinaryLeastSquares)
            .with_strong_trend_threshold(settings.strong_trend_threshold)
            .with_confidence_z(settings.confidence_z)
            .forecast(&self.monthly)
    }
}

/// Load the input, or report that there is nothing to analyze
fn load_nonempty(opts: &RunOptions) -> InsightResult<Option<Dataset>> {
    let dataset = Dataset::load(&opts.input, &opts.settings)?;
    if dataset.is_empty() {
        println!("No transactions found in {}", opts.input.display());
        return Ok(None);
    }
    Ok(Some(dataset))
}

/// Render charts, logging (not propagating) failures
///
/// Returns the number of artifacts written.
fn render_charts(dataset: &Dataset, settings: &Settings) -> usize {
    let renderer = FileChartRenderer::new(
        ChartPaths::new(&settings.charts_dir),
        settings.currency_symbol.clone(),
    );

    let mut written = 0;
    for result in renderer.render(&dataset.categories, &dataset.monthly) {
        match result {
            Ok(path) => {
                written += 1;
                info!(path = %path.display(), "chart artifact ready");
            }
            Err(e) => warn!(error = %e, "chart artifact not written"),
        }
    }
    written
}

fn print_charts_outcome(written: usize, settings: &Settings) {
    if written > 0 {
        println!(
            "Charts created and saved in '{}' directory",
            settings.charts_dir.display()
        );
    } else {
        println!("Charts could not be created (see log for details)");
    }
}

fn print_forecast(dataset: &Dataset, settings: &Settings) {
    let currency = &settings.currency_symbol;
    print!("{}", format_forecast(&dataset.forecast(settings), currency));
    print!("{}", format_trends(analyze_trends(&dataset.monthly).as_ref(), currency));
}

/// Full pipeline: summary, charts, forecast and trends
pub fn handle_analyze(opts: &RunOptions) -> InsightResult<()> {
    println!("Starting Budget & Expense Analysis...");

    let Some(dataset) = load_nonempty(opts)? else {
        return Ok(());
    };
    println!(
        "Loaded {} transactions from {}",
        dataset.transactions.len(),
        opts.input.display()
    );
    println!();

    let settings = &opts.settings;
    print!(
        "{}",
        dataset
            .summary(opts.reference_month)
            .format_terminal(&settings.currency_symbol)
    );

    if !opts.skip_charts {
        println!("\nCreating charts...");
        let written = render_charts(&dataset, settings);
        print_charts_outcome(written, settings);
    }

    println!("\nMaking spending prediction...");
    print_forecast(&dataset, settings);

    println!("\nAnalysis complete! Check the generated charts and prediction.");
    Ok(())
}

/// Summary report only
pub fn handle_summary(opts: &RunOptions, table: bool) -> InsightResult<()> {
    let Some(dataset) = load_nonempty(opts)? else {
        return Ok(());
    };

    let currency = &opts.settings.currency_symbol;
    print!(
        "{}",
        dataset
            .summary(opts.reference_month)
            .format_terminal(currency)
    );
    if table {
        println!();
        println!("{}", format_category_table(&dataset.categories, currency));
    }
    Ok(())
}

/// Forecast and trend analysis only
pub fn handle_forecast(opts: &RunOptions) -> InsightResult<()> {
    let Some(dataset) = load_nonempty(opts)? else {
        return Ok(());
    };
    print_forecast(&dataset, &opts.settings);
    Ok(())
}

/// Chart artifacts only
pub fn handle_charts(opts: &RunOptions) -> InsightResult<()> {
    let Some(dataset) = load_nonempty(opts)? else {
        return Ok(());
    };
    let written = render_charts(&dataset, &opts.settings);
    print_charts_outcome(written, &opts.settings);
    Ok(())
}

/// Print the effective configuration, optionally persisting it
pub fn handle_config(
    opts: &RunOptions,
    settings_file: Option<&Path>,
    save: bool,
) -> InsightResult<()> {
    let settings = &opts.settings;
    let paths = ChartPaths::new(&settings.charts_dir);

    if save {
        let path = settings_file.ok_or_else(|| {
            InsightError::Config("No settings file location available; use --config".into())
        })?;
        settings.save(path)?;
        info!(path = %path.display(), "saved settings");
        println!("Saved settings to {}", path.display());
    }

    println!("budget-insight Configuration");
    println!("============================");
    match settings_file {
        Some(path) if path.exists() => println!("Settings file:   {}", path.display()),
        Some(path) => println!("Settings file:   {} (not present, using defaults)", path.display()),
        None => println!("Settings file:   (none, using defaults)"),
    }
    println!("Input file:      {}", opts.input.display());
    println!("Charts dir:      {}", paths.output_dir().display());
    println!("Static chart:    {}", paths.static_chart().display());
    println!("Dashboard:       {}", paths.dashboard().display());
    println!("Current month:   {}", opts.reference_month);
    println!();
    println!("Settings:");
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn options(dir: &TempDir, csv: &str) -> RunOptions {
        let input = dir.path().join("expenses.csv");
        std::fs::write(&input, csv).unwrap();
        let settings = Settings {
            charts_dir: dir.path().join("charts"),
            ..Settings::default()
        };
        RunOptions {
            settings,
            input,
            reference_month: MonthKey::new(2024, 2).unwrap(),
            skip_charts: false,
        }
    }

    #[test]
    fn test_dataset_from_transactions() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dataset = Dataset::from_transactions(vec![
            Transaction::new(date, "A", Money::from_cents(100)),
            Transaction::new(date, "B", Money::from_cents(300)),
        ]);
        assert_eq!(dataset.categories.len(), 2);
        assert_eq!(dataset.monthly.len(), 1);
        assert!(dataset.forecast(&Settings::default()).result().is_none());
    }

    #[test]
    fn test_handle_analyze_writes_charts() {
        let dir = TempDir::new().unwrap();
        let opts = options(
            &dir,
            "Date,Category,Amount\n2024-01-01,Food,10\n2024-02-01,Food,20\n",
        );

        handle_analyze(&opts).unwrap();
        assert!(dir.path().join("charts").join("spending_charts.png").exists());
        assert!(dir.path().join("charts").join("dashboard.html").exists());
    }

    #[test]
    fn test_handle_analyze_skip_charts() {
        let dir = TempDir::new().unwrap();
        let mut opts = options(&dir, "Date,Category,Amount\n2024-01-01,Food,10\n");
        opts.skip_charts = true;

        handle_analyze(&opts).unwrap();
        assert!(!dir.path().join("charts").exists());
    }

    #[test]
    fn test_chart_write_failure_does_not_abort() {
        let dir = TempDir::new().unwrap();
        let opts = options(
            &dir,
            "Date,Category,Amount\n2024-01-01,Food,10\n2024-02-01,Food,20\n",
        );
        // A regular file where the chart directory should be
        std::fs::write(&opts.settings.charts_dir, "not a directory").unwrap();

        handle_analyze(&opts).unwrap();
        assert!(dir.path().join("charts").is_file());

        let dataset = Dataset::load(&opts.input, &opts.settings).unwrap();
        assert_eq!(render_charts(&dataset, &opts.settings), 0);
    }

    #[test]
    fn test_missing_input_aborts() {
        let dir = TempDir::new().unwrap();
        let mut opts = options(&dir, "");
        opts.input = dir.path().join("absent.csv");

        let err = handle_analyze(&opts).unwrap_err();
        assert!(matches!(err, InsightError::SourceNotFound(_)));
        assert!(!dir.path().join("charts").exists());
    }

    #[test]
    fn test_handle_config_save_writes_settings() {
        let dir = TempDir::new().unwrap();
        let mut opts = options(&dir, "");
        opts.settings.currency_symbol = "$".into();
        let path = dir.path().join("conf").join("settings.json");

        handle_config(&opts, Some(&path), true).unwrap();
        let saved = Settings::load_or_default(&path).unwrap();
        assert_eq!(saved.currency_symbol, "$");
    }

    #[test]
    fn test_handle_config_save_needs_location() {
        let dir = TempDir::new().unwrap();
        let opts = options(&dir, "");
        let err = handle_config(&opts, None, true).unwrap_err();
        assert!(matches!(err, InsightError::Config(_)));
    }

    #[test]
    fn test_empty_dataset_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let opts = options(&dir, "Date,Category,Amount\n");
        handle_analyze(&opts).unwrap();
        assert!(!dir.path().join("charts").exists());
    }
}
