//! Dataset loader for the employee records CSV

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use super::error::ReportError;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATASET: &str = "employee_attrition.csv";

/// Shape and memory footprint of a loaded dataset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetStats {
    pub rows: usize,
    pub cols: usize,
    pub memory_mb: f64,
}

impl DatasetStats {
    pub fn from_frame(df: &DataFrame) -> Self {
        let (rows, cols) = df.shape();
        Self {
            rows,
            cols,
            memory_mb: df.estimated_size() as f64 / (1024.0 * 1024.0),
        }
    }
}

/// Load the employee records CSV into a DataFrame.
///
/// Column types are inferred from the first `infer_schema_length` rows
/// (0 means a full scan). A missing or unreadable file fails with
/// [`ReportError::DataUnavailable`]; no schema checks happen here, so a
/// missing column only surfaces when a report block first asks for it.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame, ReportError> {
    let file = open_dataset(path)?;

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(schema_length)
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|source| ReportError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        cols = df.width(),
        "dataset loaded"
    );

    Ok(df)
}

/// Read only the header of the CSV and return its column names
pub fn get_column_names(path: &Path) -> Result<Vec<String>, ReportError> {
    // Surface the same handled error as a full load.
    drop(open_dataset(path)?);

    let schema = LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()
        .and_then(|mut lf| lf.collect_schema())
        .map_err(|source| ReportError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}

fn open_dataset(path: &Path) -> Result<File, ReportError> {
    if path.is_dir() {
        return Err(ReportError::DataUnavailable {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path is a directory"),
        });
    }

    File::open(path).map_err(|source| ReportError::DataUnavailable {
        path: path.to_path_buf(),
        source,
    })
}
