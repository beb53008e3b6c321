//! Configuration module for budget-insight
//!
//! This module provides configuration management including:
//! - Settings file resolution
//! - User settings persistence
//! - Chart output locations

pub mod paths;
pub mod settings;

pub use paths::ChartPaths;
pub use settings::Settings;
