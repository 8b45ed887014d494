//! CLI module - argument parsing and the interactive dashboard

mod args;
pub mod dashboard;

pub use args::{Cli, OutputMode, ReportConfig, DEFAULT_WIDTH};
pub use dashboard::run_dashboard;
