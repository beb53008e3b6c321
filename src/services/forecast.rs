//! Next-month spending forecast
//!
//! Fits amount ≈ slope·index + intercept over the monthly totals, where the
//! index is the 0-based position of the month in calendar order (gaps between
//! months are not counted). The regression itself sits behind
//! [`RegressionModel`] so the forecaster can be driven by any fitting backend.

use std::fmt;

use tracing::{debug, warn};

use crate::models::MonthKey;
use crate::services::aggregate::MonthlyTotals;

/// Default "strong trend" cut-off, in currency units per month
pub const DEFAULT_STRONG_TREND_THRESHOLD: f64 = 10.0;

/// Default multiplier for the normal-approximation band (95%)
pub const DEFAULT_CONFIDENCE_Z: f64 = 1.96;

/// Minimum number of months needed for a fit
pub const MIN_MONTHS: usize = 2;

/// Magnitudes below this are treated as exactly zero. Amounts have cent
/// resolution, so anything this small is floating point noise.
const EPSILON: f64 = 1e-9;

/// A fitted straight line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Value of the line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits a line through (x, y) points
pub trait RegressionModel {
    /// Fit the model; `None` when the points do not determine a line
    fn fit(&self, xs: &[f64], ys: &[f64]) -> Option<LinearFit>;
}

/// Ordinary least squares on one independent variable
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdinaryLeastSquares;

impl RegressionModel for OrdinaryLeastSquares {
    fn fit(&self, xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
        if xs.len() != ys.len() || xs.len() < 2 {
            return None;
        }

        let n = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (x, y) in xs.iter().zip(ys) {
            let dx = x - mean_x;
            sxx += dx * dx;
            sxy += dx * (y - mean_y);
        }

        if sxx.abs() < EPSILON {
            return None;
        }

        let mut slope = sxy / sxx;
        if slope.abs() < EPSILON {
            slope = 0.0;
        }

        Some(LinearFit {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }
}

/// Direction of the fitted trend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

impl TrendDirection {
    /// Only a strictly positive slope counts as increasing
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            Self::Increasing
        } else {
            Self::Decreasing
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increasing => write!(f, "increasing"),
            Self::Decreasing => write!(f, "decreasing"),
        }
    }
}

/// Qualitative size of the fitted slope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendStrength {
    Moderate,
    Strong,
}

impl TrendStrength {
    /// Strong when |slope| exceeds `threshold` currency units per month
    pub fn from_slope(slope: f64, threshold: f64) -> Self {
        if slope.abs() > threshold {
            Self::Strong
        } else {
            Self::Moderate
        }
    }
}

impl fmt::Display for TrendStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moderate => write!(f, "moderate"),
            Self::Strong => write!(f, "strong"),
        }
    }
}

/// A successful forecast; every field is populated
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    /// Predicted total for the month after the last one in the series
    pub predicted_amount: f64,
    /// Coefficient of determination of the in-sample fit
    pub r_squared: f64,
    /// Mean absolute in-sample residual
    pub mean_absolute_error: f64,
    pub trend_direction: TrendDirection,
    pub trend_strength: TrendStrength,
    /// Half-width of the normal-approximation band around the prediction
    pub confidence_interval_halfwidth: f64,
    pub slope: f64,
    pub intercept: f64,
    /// Number of months the model was fitted on
    pub months_used: usize,
    /// Calendar month following the last observed month, if known
    pub next_month: Option<MonthKey>,
}

impl ForecastResult {
    pub fn lower_bound(&self) -> f64 {
        self.predicted_amount - self.confidence_interval_halfwidth
    }

    pub fn upper_bound(&self) -> f64 {
        self.predicted_amount + self.confidence_interval_halfwidth
    }
}

/// Outcome of a forecast attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastOutcome {
    /// Fewer than [`MIN_MONTHS`] months of data; not an error
    InsufficientData { months: usize },
    Forecast(ForecastResult),
}

impl ForecastOutcome {
    /// The forecast, if one was produced
    pub fn result(&self) -> Option<&ForecastResult> {
        match self {
            Self::Forecast(result) => Some(result),
            Self::InsufficientData { .. } => None,
        }
    }
}

/// Produces next-month forecasts from monthly totals
pub struct Forecaster<M = OrdinaryLeastSquares> {
    model: M,
    strong_trend_threshold: f64,
    confidence_z: f64,
}

impl Default for Forecaster<OrdinaryLeastSquares> {
    fn default() -> Self {
        Self::new(OrdinaryLeastSquares)
    }
}

impl<M: RegressionModel> Forecaster<M> {
    /// Create a forecaster around a regression backend
    pub fn new(model: M) -> Self {
        Self {
            model,
            strong_trend_threshold: DEFAULT_STRONG_TREND_THRESHOLD,
            confidence_z: DEFAULT_CONFIDENCE_Z,
        }
    }

    /// Set the "strong trend" slope cut-off
    pub fn with_strong_trend_threshold(mut self, threshold: f64) -> Self {
        self.strong_trend_threshold = threshold;
        self
    }

    /// Set the band multiplier
    pub fn with_confidence_z(mut self, z: f64) -> Self {
        self.confidence_z = z;
        self
    }

    /// Forecast the month after the last one in `monthly`
    pub fn forecast(&self, monthly: &MonthlyTotals) -> ForecastOutcome {
        let next_month = monthly.last_month().map(|m| m.next());
        match self.forecast_series(&monthly.amounts()) {
            ForecastOutcome::Forecast(mut result) => {
                result.next_month = next_month;
                ForecastOutcome::Forecast(result)
            }
            outcome => outcome,
        }
    }

    /// Forecast the value following a raw series of monthly amounts
    pub fn forecast_series(&self, amounts: &[f64]) -> ForecastOutcome {
        if amounts.len() < MIN_MONTHS {
            warn!(
                months = amounts.len(),
                "not enough data for prediction (need at least {} months)", MIN_MONTHS
            );
            return ForecastOutcome::InsufficientData {
                months: amounts.len(),
            };
        }

        let xs: Vec<f64> = (0..amounts.len()).map(|i| i as f64).collect();
        let Some(fit) = self.model.fit(&xs, amounts) else {
            warn!(months = amounts.len(), "regression did not produce a fit");
            return ForecastOutcome::InsufficientData {
                months: amounts.len(),
            };
        };

        let fitted: Vec<f64> = xs.iter().map(|x| fit.predict(*x)).collect();
        let residuals: Vec<f64> = amounts
            .iter()
            .zip(&fitted)
            .map(|(actual, predicted)| actual - predicted)
            .collect();

        let result = ForecastResult {
            predicted_amount: fit.predict(amounts.len() as f64),
            r_squared: r_squared(amounts, &residuals),
            mean_absolute_error: mean(residuals.iter().map(|r| r.abs())),
            trend_direction: TrendDirection::from_slope(fit.slope),
            trend_strength: TrendStrength::from_slope(fit.slope, self.strong_trend_threshold),
            confidence_interval_halfwidth: self.confidence_z * population_std_dev(&residuals),
            slope: fit.slope,
            intercept: fit.intercept,
            months_used: amounts.len(),
            next_month: None,
        };

        debug!(
            slope = result.slope,
            intercept = result.intercept,
            r_squared = result.r_squared,
            "fitted spending trend"
        );
        ForecastOutcome::Forecast(result)
    }
}

/// 1 − SSres/SStot, with a constant series scoring 1 only if it is fitted exactly
fn r_squared(actual: &[f64], residuals: &[f64]) -> f64 {
    let mean_actual = mean(actual.iter().copied());
    let ss_tot: f64 = actual.iter().map(|y| (y - mean_actual).powi(2)).sum();
    let ss_res: f64 = residuals.iter().map(|r| r * r).sum();

    if ss_tot < EPSILON {
        if ss_res < EPSILON {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - ss_res / ss_tot
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Standard deviation with divisor n
pub(crate) fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values.iter().copied());
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
