//! Descriptive trend analysis over monthly totals
//!
//! Complements the regression forecast with simple statistics: average
//! month-over-month change, volatility, and a first-half/second-half
//! comparison once there is enough history.

use crate::services::aggregate::MonthlyTotals;
use crate::services::forecast::population_std_dev;

/// Months required before any trend analysis is reported
pub const MIN_MONTHS_FOR_TRENDS: usize = 3;

/// Months required for the half-over-half comparison
pub const MIN_MONTHS_FOR_PATTERN: usize = 6;

/// Direction suggested by comparing the two halves of the history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendingPattern {
    Decreasing,
    Increasing,
    Stable,
}

/// Result of [`analyze_trends`]
#[derive(Debug, Clone, PartialEq)]
pub struct TrendAnalysis {
    /// Mean of consecutive month-to-month differences
    pub average_change: f64,
    /// Population standard deviation of the monthly totals
    pub volatility: f64,
    /// Present with at least [`MIN_MONTHS_FOR_PATTERN`] months
    pub pattern: Option<SpendingPattern>,
}

/// Analyze month-over-month movement; `None` below [`MIN_MONTHS_FOR_TRENDS`]
pub fn analyze_trends(monthly: &MonthlyTotals) -> Option<TrendAnalysis> {
    analyze_series(&monthly.amounts())
}

/// Same as [`analyze_trends`] over a raw series
pub fn analyze_series(amounts: &[f64]) -> Option<TrendAnalysis> {
    if amounts.len() < MIN_MONTHS_FOR_TRENDS {
        return None;
    }

    let changes: Vec<f64> = amounts.windows(2).map(|w| w[1] - w[0]).collect();
    let average_change = changes.iter().sum::<f64>() / changes.len() as f64;
    let volatility = population_std_dev(amounts);

    let pattern = (amounts.len() >= MIN_MONTHS_FOR_PATTERN).then(|| {
        let (first, second) = amounts.split_at(amounts.len() / 2);
        let first_mean = first.iter().sum::<f64>() / first.len() as f64;
        let second_mean = second.iter().sum::<f64>() / second.len() as f64;

        if (first_mean - second_mean).abs() > volatility * 0.5 {
            if first_mean > second_mean {
                SpendingPattern::Decreasing
            } else {
                SpendingPattern::Increasing
            }
        } else {
            SpendingPattern::Stable
        }
    });

    Some(TrendAnalysis {
        average_change,
        volatility,
        pattern,
    })
}
