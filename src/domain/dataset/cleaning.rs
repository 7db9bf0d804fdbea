//! Missing-value handling and column conversions.
//!
//! Every operation returns a derived dataset; the input is never mutated.

use serde::{Deserialize, Serialize};

use super::column::{parse_number, CellValue, Column, ColumnKind};
use super::table::{Dataset, DatasetError};
use crate::domain::report::{fmt2, Table};
use crate::domain::stats;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingEntry {
    pub column: String,
    pub count: usize,
    pub percentage: f64,
}

/// Strategy for dealing with missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Remediation {
    /// Remove every row with at least one missing cell.
    DropRows,
    /// Replace missing numeric cells with the column mean.
    MeanFill,
    /// Replace missing numeric cells with the column median.
    MedianFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conversion {
    ToNumeric,
    ToCategorical,
    OneHot,
}

impl Dataset {
    /// Missing count and percentage for every column.
    pub fn missing_report(&self) -> Vec<MissingEntry> {
        let rows = self.row_count();
        self.columns()
            .iter()
            .map(|c| {
                let count = c.missing_count();
                let percentage = if rows == 0 {
                    0.0
                } else {
                    count as f64 / rows as f64 * 100.0
                };
                MissingEntry {
                    column: c.name.clone(),
                    count,
                    percentage,
                }
            })
            .collect()
    }

    pub fn missing_table(&self) -> Table {
        let mut table = Table::new("Missing values", &["Column", "Missing", "Percentage"]);
        for entry in self.missing_report() {
            table.push_row(vec![
                entry.column,
                entry.count.to_string(),
                fmt2(entry.percentage),
            ]);
        }
        table
    }

    pub fn has_missing(&self) -> bool {
        self.columns().iter().any(|c| c.missing_count() > 0)
    }

    pub fn remediate(&self, strategy: Remediation) -> Dataset {
        let (name, columns) = self.clone().into_columns();
        let columns = match strategy {
            Remediation::DropRows => {
                let keep: Vec<bool> = (0..self.row_count())
                    .map(|r| self.row(r).iter().all(|v| !v.is_missing()))
                    .collect();
                columns
                    .into_iter()
                    .map(|c| {
                        let values = c
                            .values
                            .into_iter()
                            .zip(&keep)
                            .filter(|(_, k)| **k)
                            .map(|(v, _)| v)
                            .collect();
                        Column::new(c.name, c.kind, values)
                    })
                    .collect()
            }
            Remediation::MeanFill => fill_numeric(columns, stats::mean),
            Remediation::MedianFill => fill_numeric(columns, stats::median),
        };
        Dataset::derived(name, columns)
    }

    /// Applies a conversion to one column.
    ///
    /// One-hot encoding replaces the column with `{column}_{value}` indicator
    /// columns appended at the end.
    pub fn convert(&self, column: &str, conversion: Conversion) -> Result<Dataset, DatasetError> {
        self.column(column)?;
        let (name, columns) = self.clone().into_columns();
        let columns = match conversion {
            Conversion::ToNumeric => map_column(columns, column, to_numeric),
            Conversion::ToCategorical => map_column(columns, column, to_categorical),
            Conversion::OneHot => one_hot(columns, column),
        };
        Dataset::new(name, columns)
    }
}

fn fill_numeric(columns: Vec<Column>, statistic: fn(&[f64]) -> Option<f64>) -> Vec<Column> {
    columns
        .into_iter()
        .map(|c| {
            if !c.is_numeric() {
                return c;
            }
            let Some(fill) = statistic(&c.numbers()) else {
                return c;
            };
            let values = c
                .values
                .into_iter()
                .map(|v| if v.is_missing() { CellValue::Number(fill) } else { v })
                .collect();
            Column::new(c.name, c.kind, values)
        })
        .collect()
}

fn map_column(columns: Vec<Column>, target: &str, f: fn(Column) -> Column) -> Vec<Column> {
    columns
        .into_iter()
        .map(|c| if c.name == target { f(c) } else { c })
        .collect()
}

fn to_numeric(c: Column) -> Column {
    let values = c
        .values
        .into_iter()
        .map(|v| match v {
            CellValue::Number(n) => CellValue::Number(n),
            CellValue::Text(s) => parse_number(&s).map_or(CellValue::Missing, CellValue::Number),
            _ => CellValue::Missing,
        })
        .collect();
    Column::new(c.name, ColumnKind::Numeric, values)
}

fn to_categorical(c: Column) -> Column {
    let values = c
        .values
        .into_iter()
        .map(|v| v.key().map_or(CellValue::Missing, CellValue::Text))
        .collect();
    Column::new(c.name, ColumnKind::Categorical, values)
}

fn one_hot(columns: Vec<Column>, target: &str) -> Vec<Column> {
    let mut kept = Vec::with_capacity(columns.len());
    let mut encoded = Vec::new();
    for c in columns {
        if c.name != target {
            kept.push(c);
            continue;
        }
        for key in c.distinct_keys() {
            let values = c
                .values
                .iter()
                .map(|v| {
                    let hit = v.key().as_deref() == Some(key.as_str());
                    CellValue::Number(if hit { 1.0 } else { 0.0 })
                })
                .collect();
            encoded.push(Column::new(
                format!("{}_{}", c.name, key),
                ColumnKind::Numeric,
                values,
            ));
        }
    }
    kept.extend(encoded);
    kept
}
