//! Attrition rate aggregation, overall and per group

use polars::prelude::*;

use super::columns::ATTRITION;
use super::encode::AttritionTable;
use super::error::ReportError;

/// Attrition rate of one group of rows sharing a key value
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRate {
    /// Key value rendered as text
    pub key: String,
    /// Rows in the group
    pub rows: usize,
    /// Rows with a known (non-null) attrition flag
    pub known: usize,
    /// Percentage in [0, 100]; `None` when no row in the group has a known flag
    pub rate: Option<f64>,
}

/// Overall attrition rate in percent, `None` if no row has a known flag
pub fn overall_attrition_rate(table: &AttritionTable) -> Result<Option<f64>, ReportError> {
    let col = table.frame().column(ATTRITION)?;
    Ok(col.as_materialized_series().mean().map(|m| m * 100.0))
}

/// Attrition rate per distinct value of `key`.
///
/// Groups come out in order of first appearance in the data. Rows whose key
/// is null form no group. The table is only read.
pub fn grouped_attrition_rate(
    table: &AttritionTable,
    key: &str,
) -> Result<Vec<GroupRate>, ReportError> {
    let grouped = table
        .frame()
        .clone()
        .lazy()
        .group_by_stable([col(key)])
        .agg([
            col(ATTRITION).mean().alias("rate"),
            col(ATTRITION).count().alias("known"),
            len().alias("rows"),
        ])
        .collect()?;

    let keys = grouped.column(key)?.cast(&DataType::String)?;
    let rates = grouped.column("rate")?.cast(&DataType::Float64)?;
    let known = grouped.column("known")?.cast(&DataType::UInt64)?;
    let rows = grouped.column("rows")?.cast(&DataType::UInt64)?;

    let groups: Vec<GroupRate> = keys
        .str()?
        .into_iter()
        .zip(rates.f64()?)
        .zip(known.u64()?)
        .zip(rows.u64()?)
        .filter_map(|(((key, rate), known), rows)| {
            key.map(|k| GroupRate {
                key: k.to_string(),
                rows: rows.unwrap_or(0) as usize,
                known: known.unwrap_or(0) as usize,
                rate: rate.filter(|r| !r.is_nan()).map(|r| r * 100.0),
            })
        })
        .collect();

    tracing::debug!(key, groups = groups.len(), "grouped attrition rate");

    Ok(groups)
}

/// Row-weighted mean of group rates, in percent.
///
/// Weights by known rows so the result matches [`overall_attrition_rate`]
/// whenever every row has a key.
pub fn weighted_mean_rate(groups: &[GroupRate]) -> Option<f64> {
    let (weighted_sum, total) = groups
        .iter()
        .filter_map(|g| g.rate.map(|r| (r * g.known as f64, g.known)))
        .fold((0.0, 0usize), |(sum, n), (w, k)| (sum + w, n + k));

    if total == 0 {
        None
    } else {
        Some(weighted_sum / total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{encode_attrition, UnknownValuePolicy};

    fn encoded(df: DataFrame) -> AttritionTable {
        encode_attrition(df, UnknownValuePolicy::Missing).unwrap()
    }

    #[test]
    fn test_three_row_scenario() {
        let table = encoded(
            df! {
                "Attrition" => ["Yes", "No", "No"],
                "Department" => ["Sales", "Sales", "HR"],
            }
            .unwrap(),
        );

        let overall = overall_attrition_rate(&table).unwrap().unwrap();
        assert_eq!(format!("{:.2}", overall), "33.33");

        let groups = grouped_attrition_rate(&table, "Department").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "Sales");
        assert_eq!(groups[0].rows, 2);
        assert!((groups[0].rate.unwrap() - 50.0).abs() < 1e-9);
        assert_eq!(groups[1].key, "HR");
        assert!((groups[1].rate.unwrap() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_integer_keys_rendered_as_text() {
        let table = encoded(
            df! {
                "Attrition" => ["Yes", "No", "Yes", "No"],
                "WorkLifeBalance" => [1i64, 1, 3, 3],
            }
            .unwrap(),
        );

        let groups = grouped_attrition_rate(&table, "WorkLifeBalance").unwrap();
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "3"]);
    }

    #[test]
    fn test_all_unknown_group_has_no_rate() {
        let table = encoded(
            df! {
                "Attrition" => ["Yes", "No", "??", "??"],
                "Department" => ["Sales", "Sales", "HR", "HR"],
            }
            .unwrap(),
        );

        let groups = grouped_attrition_rate(&table, "Department").unwrap();
        let hr = groups.iter().find(|g| g.key == "HR").unwrap();
        assert_eq!(hr.rows, 2);
        assert_eq!(hr.known, 0);
        assert_eq!(hr.rate, None);
    }

    #[test]
    fn test_null_keys_form_no_group() {
        let table = encoded(
            df! {
                "Attrition" => ["Yes", "No", "No"],
                "Department" => [Some("Sales"), None, Some("Sales")],
            }
            .unwrap(),
        );

        let groups = grouped_attrition_rate(&table, "Department").unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].rows, 2);
    }

    #[test]
    fn test_missing_key_column_is_error() {
        let table = encoded(
            df! {
                "Attrition" => ["Yes"],
            }
            .unwrap(),
        );

        assert!(grouped_attrition_rate(&table, "Department").is_err());
    }

    #[test]
    fn test_weighted_mean_rate_empty() {
        assert_eq!(weighted_mean_rate(&[]), None);
    }
}
