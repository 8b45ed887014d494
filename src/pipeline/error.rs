//! Error types for loading and encoding the attrition dataset.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised by the data pipeline.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The input file is missing or cannot be opened.
    ///
    /// This is the one failure the binary reports with a dedicated message
    /// before halting; no part of the report is rendered.
    #[error("File {} not found. Please check the path and try again.", path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but could not be parsed as CSV.
    #[error("Failed to parse CSV file {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    /// An `Attrition` value other than "Yes"/"No" was found in strict mode.
    #[error("Unexpected Attrition value {value:?} at row {row} (expected \"Yes\" or \"No\")")]
    UnexpectedAttritionValue { row: usize, value: String },

    /// Any other dataframe error, e.g. a missing column.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl ReportError {
    /// True for the handled "file not available" condition.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, ReportError::DataUnavailable { .. })
    }
}
