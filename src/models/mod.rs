//! Core data models for budget-insight
//!
//! This module contains the data structures the analysis runs on: amounts,
//! reporting months, and the transactions loaded from the input file.

pub mod money;
pub mod month;
pub mod transaction;

pub use money::{Money, MoneyParseError};
pub use month::{MonthKey, MonthParseError};
pub use transaction::Transaction;
