use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use budget_insight::cli::{
    handle_analyze, handle_charts, handle_config, handle_forecast, handle_summary, RunOptions,
};
use budget_insight::config::{paths, Settings};
use budget_insight::models::MonthKey;

#[derive(Parser)]
#[command(
    name = "budget-insight",
    version,
    about = "Expense analysis and next-month spending forecast",
    long_about = "budget-insight reads a CSV of dated, categorized expenses (Date, \
                  Category, Amount), prints a spending summary, renders charts and \
                  predicts next month's spending from the monthly trend."
)]
struct Cli {
    /// CSV file to analyze [default: sample_expenses.csv]
    input: Option<PathBuf>,

    /// Month treated as the current month (YYYY-MM) [default: today]
    #[arg(short, long, global = true)]
    month: Option<MonthKey>,

    /// Directory chart files are written to [default: charts]
    #[arg(long, global = true)]
    charts_dir: Option<PathBuf>,

    /// Currency symbol used in the output [default: £]
    #[arg(long, global = true)]
    currency: Option<String>,

    /// Skip chart rendering
    #[arg(long, global = true)]
    no_charts: bool,

    /// Settings file
    #[arg(long, global = true, env = "BUDGET_INSIGHT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis (default)
    Analyze,

    /// Print the spending summary only
    Summary {
        /// Also show the category breakdown as a table
        #[arg(long)]
        table: bool,
    },

    /// Print the spending prediction and trend analysis only
    #[command(alias = "predict")]
    Forecast,

    /// Render the chart files only
    Charts,

    /// Show the effective configuration
    Config {
        /// Write the effective settings to the settings file
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let settings_file = paths::settings_file(cli.config.as_deref());
    let mut settings = match &settings_file {
        Some(path) => Settings::load_or_default(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    if let Some(dir) = cli.charts_dir {
        settings.charts_dir = dir;
    }
    if let Some(symbol) = cli.currency {
        settings.currency_symbol = symbol;
    }

    let reference_month = cli
        .month
        .unwrap_or_else(|| MonthKey::from_date(chrono::Local::now().date_naive()));

    let opts = RunOptions {
        input: cli.input.unwrap_or_else(|| settings.input_file.clone()),
        settings,
        reference_month,
        skip_charts: cli.no_charts,
    };

    match cli.command {
        None | Some(Commands::Analyze) => handle_analyze(&opts)?,
        Some(Commands::Summary { table }) => handle_summary(&opts, table)?,
        Some(Commands::Forecast) => handle_forecast(&opts)?,
        Some(Commands::Charts) => handle_charts(&opts)?,
        Some(Commands::Config { save }) => {
            handle_config(&opts, settings_file.as_deref(), save)?
        }
    }

    Ok(())
}
