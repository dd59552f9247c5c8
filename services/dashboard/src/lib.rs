//! Kuskokwim Bay sea-ice dashboard.
//!
//! Produces an interactive ice-chart map and per-region temperature and ice
//! figures for the ADF&G forecast regions.

pub mod config;
pub mod pipeline;

pub use config::DashboardConfig;
pub use pipeline::{run, RunOptions, RunSummary};
