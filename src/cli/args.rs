//! Command-line argument definitions using clap

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::pipeline::{UnknownValuePolicy, DEFAULT_DATASET};

/// Chart width when the terminal size is unknown
pub const DEFAULT_WIDTH: u16 = 100;

/// Narrowest chart width accepted
const MIN_WIDTH: u16 = 40;

/// churnscope - Explore employee attrition patterns in the terminal
#[derive(Parser, Debug)]
#[command(name = "churnscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV file with one employee record per row
    #[arg(short, long, default_value = DEFAULT_DATASET)]
    pub input: PathBuf,

    /// Print the report to stdout instead of opening the interactive dashboard.
    /// Implied when stdout is not a terminal.
    #[arg(long, default_value = "false")]
    pub plain: bool,

    /// Number of rows shown in the dataset preview (0 shows every row)
    #[arg(long, default_value = "10")]
    pub preview_rows: usize,

    /// Fail on Attrition values other than "Yes"/"No" instead of treating them as missing
    #[arg(long, default_value = "false")]
    pub strict: bool,

    /// Number of rows to use for schema inference.
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Chart width in columns for plain output (defaults to the terminal width)
    #[arg(long, value_parser = validate_width)]
    pub width: Option<u16>,

    /// Print the dataset's column names and exit
    #[arg(long, default_value = "false")]
    pub list_columns: bool,

    /// Increase diagnostic logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// How the report is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Dashboard,
    Plain,
}

/// Resolved run configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub preview_rows: usize,
    pub policy: UnknownValuePolicy,
    pub infer_schema_length: usize,
    pub mode: OutputMode,
    pub width: u16,
}

impl Cli {
    /// Resolve flags against the terminal the report is going to
    pub fn config(&self, stdout_is_terminal: bool, terminal_width: Option<u16>) -> ReportConfig {
        let mode = if self.plain || !stdout_is_terminal {
            OutputMode::Plain
        } else {
            OutputMode::Dashboard
        };

        let policy = if self.strict {
            UnknownValuePolicy::Error
        } else {
            UnknownValuePolicy::Missing
        };

        ReportConfig {
            input: self.input.clone(),
            preview_rows: self.preview_rows,
            policy,
            infer_schema_length: self.infer_schema_length,
            mode,
            width: self
                .width
                .or(terminal_width)
                .unwrap_or(DEFAULT_WIDTH)
                .max(MIN_WIDTH),
        }
    }
}

/// Validator for the width parameter
fn validate_width(s: &str) -> Result<u16, String> {
    let value: u16 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid width", s))?;

    if value < MIN_WIDTH {
        Err(format!("width must be at least {}, got {}", MIN_WIDTH, value))
    } else {
        Ok(value)
    }
}
