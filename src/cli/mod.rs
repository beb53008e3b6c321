//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the analysis layer.

pub mod analyze;

pub use analyze::{
    handle_analyze, handle_charts, handle_config, handle_forecast, handle_summary, Dataset,
    RunOptions,
};
