//! Forecast and trend report
//!
//! Terminal formatting for the next-month prediction and the descriptive
//! trend statistics.

use crate::display::report::{format_amount, section};
use crate::services::forecast::MIN_MONTHS;
use crate::services::{ForecastOutcome, SpendingPattern, TrendAnalysis};

/// Format a forecast outcome; a missing forecast prints an explanation
pub fn format_forecast(outcome: &ForecastOutcome, currency: &str) -> String {
    let mut output = section("Spending prediction");

    let Some(result) = outcome.result() else {
        output.push_str(&format!(
            "Not enough data for prediction (need at least {} months)\n",
            MIN_MONTHS
        ));
        return output;
    };

    let label = result
        .next_month
        .map(|m| format!("next month ({})", m))
        .unwrap_or_else(|| "next month".to_string());

    output.push_str(&format!(
        "Predicted spending for {}: {}\n",
        label,
        format_amount(result.predicted_amount, currency)
    ));
    output.push_str(&format!("Model confidence (R²): {:.3}\n", result.r_squared));
    output.push_str(&format!(
        "Average prediction error: {}\n",
        format_amount(result.mean_absolute_error, currency)
    ));
    output.push_str(&format!(
        "Spending trend: {} {} trend ({}/month)\n",
        result.trend_strength,
        result.trend_direction,
        format_amount(result.slope, currency)
    ));
    output.push_str(&format!(
        "95% confidence interval: {} - {}\n",
        format_amount(result.lower_bound(), currency),
        format_amount(result.upper_bound(), currency)
    ));

    output
}

/// Format the trend analysis; nothing is printed without enough history
pub fn format_trends(analysis: Option<&TrendAnalysis>, currency: &str) -> String {
    let Some(analysis) = analysis else {
        return String::new();
    };

    let mut output = section("Trend analysis");

    if analysis.average_change > 0.0 {
        output.push_str(&format!(
            "Average monthly increase: {}\n",
            format_amount(analysis.average_change, currency)
        ));
    } else {
        output.push_str(&format!(
            "Average monthly decrease: {}\n",
            format_amount(analysis.average_change.abs(), currency)
        ));
    }

    output.push_str(&format!(
        "Spending volatility: {}\n",
        format_amount(analysis.volatility, currency)
    ));

    match analysis.pattern {
        Some(SpendingPattern::Decreasing) => {
            output.push_str("Spending appears to be decreasing over time\n")
        }
        Some(SpendingPattern::Increasing) => {
            output.push_str("Spending appears to be increasing over time\n")
        }
        Some(SpendingPattern::Stable) => {
            output.push_str("Spending appears to be relatively stable\n")
        }
        None => {}
    }

    output
}
