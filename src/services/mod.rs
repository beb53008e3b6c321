//! Analysis layer
//!
//! Loading, aggregation, forecasting and trend statistics. Everything here
//! except [`loader`] is a pure function of its inputs.

pub mod aggregate;
pub mod forecast;
pub mod loader;
pub mod trends;

pub use aggregate::{
    current_month_slice, totals_by_category, totals_by_month, CategoryTotal, CategoryTotals,
    MonthSlice, MonthlyTotals, SliceStatus,
};
pub use forecast::{
    ForecastOutcome, ForecastResult, Forecaster, LinearFit, OrdinaryLeastSquares,
    RegressionModel, TrendDirection, TrendStrength,
};
pub use loader::{ColumnMapping, Loader};
pub use trends::{analyze_trends, SpendingPattern, TrendAnalysis};
