//! Binary encoding of the `Attrition` column
//!
//! Converts the "Yes"/"No" outcome into the 1/0 integer form every
//! aggregate works on. The encoded table is its own type so that nothing
//! downstream can compute a mean over the raw strings.

use std::collections::BTreeSet;

use polars::prelude::*;

use super::columns::ATTRITION;
use super::error::ReportError;

/// Value that maps to 1 (employee left)
pub const EVENT_VALUE: &str = "Yes";
/// Value that maps to 0 (employee stayed)
pub const NON_EVENT_VALUE: &str = "No";

/// Tolerance for floating point comparison when checking binary 0/1 values
const TOLERANCE: f64 = 1e-9;

/// What to do with an `Attrition` value that is neither "Yes" nor "No"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownValuePolicy {
    /// Store a null and count the row in [`EncodingStats::unknown`]
    #[default]
    Missing,
    /// Fail with [`ReportError::UnexpectedAttritionValue`]
    Error,
}

/// Tally of how the `Attrition` column was encoded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodingStats {
    pub yes: usize,
    pub no: usize,
    /// Rows stored as null (unexpected or missing values)
    pub unknown: usize,
    /// Distinct unexpected values, nulls shown as `<null>`
    pub unknown_values: BTreeSet<String>,
}

impl EncodingStats {
    pub fn total(&self) -> usize {
        self.yes + self.no + self.unknown
    }

    pub fn has_unknown(&self) -> bool {
        self.unknown > 0
    }
}

/// Employee records with `Attrition` encoded as nullable `Int32` 1/0.
///
/// Only [`encode_attrition`] builds one.
#[derive(Debug, Clone)]
pub struct AttritionTable {
    frame: DataFrame,
    stats: EncodingStats,
}

impl AttritionTable {
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn stats(&self) -> &EncodingStats {
        &self.stats
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// The encoded attrition flags, one per row
    pub fn attrition(&self) -> Result<Vec<Option<i32>>, ReportError> {
        let col = self.frame.column(ATTRITION)?;
        Ok(col.i32()?.into_iter().collect())
    }

}

const NULL_LABEL: &str = "<null>";

/// Encode `Attrition` as 1 ("Yes") / 0 ("No"), replacing the column.
///
/// Takes the loaded table by value and returns the derived one. A column
/// that is already numeric 0/1 is kept as is. Anything else follows
/// `policy`; rows are never dropped.
pub fn encode_attrition(
    mut df: DataFrame,
    policy: UnknownValuePolicy,
) -> Result<AttritionTable, ReportError> {
    let col = df.column(ATTRITION)?;
    let numeric = col.dtype().is_primitive_numeric();
    let raw = column_to_string_vec(col)?;

    let mut stats = EncodingStats::default();
    let mut encoded: Vec<Option<i32>> = Vec::with_capacity(raw.len());

    for (row, value) in raw.into_iter().enumerate() {
        match classify(value.as_deref(), numeric) {
            Some(1) => {
                stats.yes += 1;
                encoded.push(Some(1));
            }
            Some(_) => {
                stats.no += 1;
                encoded.push(Some(0));
            }
            None => {
                let label = value.unwrap_or_else(|| NULL_LABEL.to_string());
                if policy == UnknownValuePolicy::Error {
                    return Err(ReportError::UnexpectedAttritionValue { row, value: label });
                }
                stats.unknown += 1;
                stats.unknown_values.insert(label);
                encoded.push(None);
            }
        }
    }

    df.with_column(Column::new(ATTRITION.into(), encoded))?;

    tracing::debug!(
        yes = stats.yes,
        no = stats.no,
        unknown = stats.unknown,
        "encoded attrition column"
    );
    if stats.has_unknown() {
        tracing::warn!(
            rows = stats.unknown,
            values = ?stats.unknown_values,
            "attrition values outside Yes/No stored as missing"
        );
    }

    Ok(AttritionTable { frame: df, stats })
}

/// Map one raw value to 1/0, or `None` if it is not a recognised outcome.
///
/// Text columns only accept the labels; 0/1 is only read from a column
/// that is numeric already.
fn classify(value: Option<&str>, numeric: bool) -> Option<i32> {
    match value {
        Some(v) if numeric => match v.parse::<f64>() {
            Ok(n) if (n - 1.0).abs() < TOLERANCE => Some(1),
            Ok(n) if n.abs() < TOLERANCE => Some(0),
            _ => None,
        },
        Some(EVENT_VALUE) => Some(1),
        Some(NON_EVENT_VALUE) => Some(0),
        _ => None,
    }
}

/// Convert a column to a Vec of Option<String> for comparison
fn column_to_string_vec(col: &Column) -> Result<Vec<Option<String>>, ReportError> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        dtype if dtype.is_primitive_numeric() => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map(|n| format!("{}", n)))
                .collect()
        }
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}
