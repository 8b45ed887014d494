//! Raw dataset preview, captured before the attrition column is encoded

use polars::prelude::*;

/// First rows of the loaded dataset as display strings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preview {
    pub columns: Vec<String>,
    /// Row-major cell text
    pub rows: Vec<Vec<String>>,
    /// Rows in the full dataset
    pub total_rows: usize,
}

impl Preview {
    /// Capture up to `max_rows` rows (0 captures every row)
    pub fn from_frame(df: &DataFrame, max_rows: usize) -> Self {
        let limit = if max_rows == 0 { df.height() } else { max_rows };
        let head = df.head(Some(limit));

        let columns: Vec<String> = head
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let mut rows = vec![Vec::with_capacity(columns.len()); head.height()];
        for column in head.get_columns() {
            for (row, value) in column.as_materialized_series().iter().enumerate() {
                rows[row].push(cell_text(value));
            }
        }

        Self {
            columns,
            rows,
            total_rows: df.height(),
        }
    }

    /// Display width of each column: the widest of header and cells
    pub fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

fn cell_text(value: AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_limits_rows() {
        let df = df! {
            "Attrition" => ["Yes", "No", "No"],
            "Age" => [Some(30i64), None, Some(50)],
        }
        .unwrap();

        let preview = Preview::from_frame(&df, 2);
        assert_eq!(preview.columns, vec!["Attrition", "Age"]);
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.total_rows, 3);
        assert_eq!(preview.rows[0], vec!["Yes", "30"]);
        assert_eq!(preview.rows[1], vec!["No", ""]);
    }

    #[test]
    fn test_preview_zero_means_all() {
        let df = df! {
            "a" => [1i64, 2, 3, 4],
        }
        .unwrap();

        assert_eq!(Preview::from_frame(&df, 0).rows.len(), 4);
    }

    #[test]
    fn test_column_widths() {
        let df = df! {
            "Department" => ["HR", "Research & Development"],
            "Age" => [30i64, 41],
        }
        .unwrap();

        let preview = Preview::from_frame(&df, 10);
        assert_eq!(preview.column_widths(), vec![22, 3]);
    }
}
