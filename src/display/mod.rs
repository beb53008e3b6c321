//! Display formatting for terminal output
//!
//! Provides helpers for amounts, percentages, bars and tables used by the
//! report layer.

pub mod category;
pub mod report;

pub use category::format_category_table;
pub use report::{format_amount, format_bar, format_percentage};
