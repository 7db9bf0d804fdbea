//! The in-memory dataset and its capacity rules.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::column::{CellValue, Column, ColumnKind};
use crate::domain::report::{fmt2, fmt_opt, Table};
use crate::domain::stats;

/// Errors raised while building or querying a dataset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("Column {position} has an empty header")]
    EmptyHeader { position: usize },

    #[error("Duplicate column header '{0}'")]
    DuplicateHeader(String),

    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Too many rows. Maximum {limit}, got {actual}")]
    TooManyRows { limit: usize, actual: usize },

    #[error("Too many columns. Maximum {limit}, got {actual}")]
    TooManyColumns { limit: usize, actual: usize },

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Column '{column}' is {actual}, expected {expected}")]
    WrongColumnKind {
        column: String,
        expected: ColumnKind,
        actual: ColumnKind,
    },
}

impl DatasetError {
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            DatasetError::TooManyRows { .. } | DatasetError::TooManyColumns { .. }
        )
    }
}

/// Row and column caps enforced after parsing and before every analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityLimits {
    pub max_rows: usize,
    pub max_columns: usize,
}

impl CapacityLimits {
    pub const DEFAULT_MAX_ROWS: usize = 10_000;
    pub const DEFAULT_MAX_COLUMNS: usize = 20;

    pub fn new(max_rows: usize, max_columns: usize) -> Self {
        Self {
            max_rows,
            max_columns,
        }
    }

    /// Columns are checked before rows.
    pub fn check(&self, dataset: &Dataset) -> Result<(), DatasetError> {
        if dataset.column_count() > self.max_columns {
            return Err(DatasetError::TooManyColumns {
                limit: self.max_columns,
                actual: dataset.column_count(),
            });
        }
        if dataset.row_count() > self.max_rows {
            return Err(DatasetError::TooManyRows {
                limit: self.max_rows,
                actual: dataset.row_count(),
            });
        }
        Ok(())
    }
}

impl Default for CapacityLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ROWS, Self::DEFAULT_MAX_COLUMNS)
    }
}

/// Shape summary shown after upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: usize,
    pub distinct_kinds: usize,
}

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

/// Rows × named typed columns owned by one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    source_name: String,
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Builds a dataset, rejecting empty or duplicate headers and ragged columns.
    pub fn new(source_name: impl Into<String>, columns: Vec<Column>) -> Result<Self, DatasetError> {
        let row_count = columns.first().map_or(0, Column::len);
        let mut seen = HashSet::new();
        for (position, column) in columns.iter().enumerate() {
            if column.name.trim().is_empty() {
                return Err(DatasetError::EmptyHeader {
                    position: position + 1,
                });
            }
            if !seen.insert(column.name.as_str()) {
                return Err(DatasetError::DuplicateHeader(column.name.clone()));
            }
            if column.len() != row_count {
                return Err(DatasetError::RaggedColumns {
                    column: column.name.clone(),
                    expected: row_count,
                    actual: column.len(),
                });
            }
        }
        Ok(Self {
            source_name: source_name.into(),
            columns,
            row_count,
        })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Names of columns of the given kind, in dataset order.
    pub fn names_of_kind(&self, kind: ColumnKind) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn numeric_names(&self) -> Vec<String> {
        self.names_of_kind(ColumnKind::Numeric)
    }

    pub fn column(&self, name: &str) -> Result<&Column, DatasetError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| DatasetError::ColumnNotFound(name.to_string()))
    }

    /// Looks up a column and requires it to be numeric.
    pub fn numeric_column(&self, name: &str) -> Result<&Column, DatasetError> {
        let column = self.column(name)?;
        if column.kind != ColumnKind::Numeric {
            return Err(DatasetError::WrongColumnKind {
                column: name.to_string(),
                expected: ColumnKind::Numeric,
                actual: column.kind,
            });
        }
        Ok(column)
    }

    /// Rebuilds from columns derived from a valid dataset, headers unchanged.
    pub(crate) fn derived(source_name: String, columns: Vec<Column>) -> Self {
        let row_count = columns.first().map_or(0, Column::len);
        Self {
            source_name,
            columns,
            row_count,
        }
    }

    pub(crate) fn into_columns(self) -> (String, Vec<Column>) {
        (self.source_name, self.columns)
    }

    /// Cell at `row` in every column.
    pub fn row(&self, row: usize) -> Vec<&CellValue> {
        self.columns.iter().filter_map(|c| c.values.get(row)).collect()
    }

    pub fn preview(&self, rows: usize) -> Table {
        let mut table = Table::with_headers("Preview", self.column_names());
        for i in 0..rows.min(self.row_count) {
            table.push_row(self.row(i).into_iter().map(ToString::to_string).collect());
        }
        table
    }

    pub fn info(&self) -> DatasetInfo {
        let kinds: HashSet<ColumnKind> = self.columns.iter().map(|c| c.kind).collect();
        DatasetInfo {
            rows: self.row_count,
            columns: self.columns.len(),
            distinct_kinds: kinds.len(),
        }
    }

    /// Column names and their inferred types.
    pub fn schema_table(&self) -> Table {
        let mut table = Table::new("Columns", &["Column", "Type", "Missing"]);
        for column in &self.columns {
            table.push_row(vec![
                column.name.clone(),
                column.kind.to_string(),
                column.missing_count().to_string(),
            ]);
        }
        table
    }

    /// Descriptive statistics for every numeric column with at least one value.
    pub fn describe(&self) -> Vec<ColumnSummary> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .filter_map(|c| {
                let data = c.numbers();
                Some(ColumnSummary {
                    column: c.name.clone(),
                    count: data.len(),
                    mean: stats::mean(&data)?,
                    std: stats::std_dev(&data),
                    min: stats::min(&data)?,
                    q25: stats::quantile(&data, 0.25)?,
                    q50: stats::quantile(&data, 0.5)?,
                    q75: stats::quantile(&data, 0.75)?,
                    max: stats::max(&data)?,
                })
            })
            .collect()
    }

    pub fn describe_table(&self) -> Table {
        let mut table = Table::new(
            "Descriptive statistics",
            &["Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"],
        );
        for s in self.describe() {
            table.push_row(vec![
                s.column,
                s.count.to_string(),
                fmt2(s.mean),
                fmt_opt(s.std),
                fmt2(s.min),
                fmt2(s.q25),
                fmt2(s.q50),
                fmt2(s.q75),
                fmt2(s.max),
            ]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            "defects.csv",
            vec![
                Column::categorical("Defecto", vec![Some("A"), Some("B"), None, Some("A")]),
                Column::numeric("Cantidad", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_duplicate_headers() {
        let result = Dataset::new(
            "x",
            vec![
                Column::numeric("a", vec![Some(1.0)]),
                Column::numeric("a", vec![Some(2.0)]),
            ],
        );
        assert_eq!(result, Err(DatasetError::DuplicateHeader("a".to_string())));
    }

    #[test]
    fn new_rejects_empty_header_and_ragged_columns() {
        assert!(matches!(
            Dataset::new("x", vec![Column::numeric(" ", vec![Some(1.0)])]),
            Err(DatasetError::EmptyHeader { position: 1 })
        ));
        assert!(matches!(
            Dataset::new(
                "x",
                vec![
                    Column::numeric("a", vec![Some(1.0)]),
                    Column::numeric("b", vec![Some(1.0), None]),
                ]
            ),
            Err(DatasetError::RaggedColumns { .. })
        ));
    }

    #[test]
    fn capacity_check_blocks_oversized_datasets() {
        let ds = sample();
        assert!(CapacityLimits::default().check(&ds).is_ok());
        let err = CapacityLimits::new(3, 20).check(&ds).unwrap_err();
        assert!(err.is_capacity());
        assert!(matches!(
            CapacityLimits::new(100, 1).check(&ds),
            Err(DatasetError::TooManyColumns { limit: 1, actual: 2 })
        ));
    }

    #[test]
    fn numeric_column_rejects_categorical() {
        let ds = sample();
        assert!(ds.numeric_column("Cantidad").is_ok());
        assert!(matches!(
            ds.numeric_column("Defecto"),
            Err(DatasetError::WrongColumnKind { .. })
        ));
        assert!(matches!(
            ds.column("Nope"),
            Err(DatasetError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn preview_is_capped_by_row_count() {
        let table = sample().preview(10);
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[2], vec!["".to_string(), "3".to_string()]);
    }

    #[test]
    fn info_counts_distinct_kinds() {
        let info = sample().info();
        assert_eq!(info.rows, 4);
        assert_eq!(info.columns, 2);
        assert_eq!(info.distinct_kinds, 2);
    }

    #[test]
    fn describe_reports_quartiles() {
        let summary = sample().describe();
        assert_eq!(summary.len(), 1);
        let s = &summary[0];
        assert_eq!(s.count, 4);
        assert!((s.q25 - 1.75).abs() < 1e-9);
        assert!((s.q75 - 3.25).abs() < 1e-9);
    }
}
