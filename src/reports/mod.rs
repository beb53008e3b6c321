//! Reports module for budget-insight
//!
//! Turns aggregates and forecasts into terminal text: the expense summary,
//! the spending prediction and the trend analysis.

pub mod forecast;
pub mod summary;

pub use forecast::{format_forecast, format_trends};
pub use summary::{CategoryLine, SummaryReport};
