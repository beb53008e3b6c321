//! budget-insight - expense analysis and spending forecast
//!
//! This library loads a CSV of dated, categorized expenses, aggregates it by
//! category and by month, renders charts, and fits a linear trend to predict
//! next month's spending.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Settings and output paths
//! - `error`: Custom error types
//! - `models`: Amounts, month keys and transactions
//! - `services`: Loading, aggregation, forecasting and trend statistics
//! - `reports`: Terminal report formatting
//! - `display`: Formatting helpers and tables
//! - `charts`: Static and interactive chart artifacts
//! - `cli`: Command handlers used by the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_insight::services::{totals_by_month, Forecaster, Loader};
//!
//! let transactions = Loader::new().load_path("sample_expenses.csv".as_ref())?;
//! let monthly = totals_by_month(&transactions);
//! let outcome = Forecaster::default().forecast(&monthly);
//! ```

pub mod charts;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{InsightError, InsightResult};
