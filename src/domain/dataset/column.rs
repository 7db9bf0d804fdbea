//! Cells, columns and column type inference.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell as delivered by a parser, before type inference.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

/// Typed cell held by a [`Column`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    Missing,
    Number(f64),
    Text(String),
    Date(NaiveDateTime),
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Grouping key; `None` for missing cells.
    pub fn key(&self) -> Option<String> {
        if self.is_missing() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Date(d) => {
                if d.time() == NaiveTime::MIN {
                    write!(f, "{}", d.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S"))
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Date,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
            ColumnKind::Date => "date",
        };
        write!(f, "{}", s)
    }
}

/// Parses a finite number from trimmed text.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses the date layouts accepted in uploads.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    for layout in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(text, layout) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self::new(
            name,
            ColumnKind::Numeric,
            values
                .into_iter()
                .map(|v| v.map_or(CellValue::Missing, CellValue::Number))
                .collect(),
        )
    }

    pub fn categorical<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        Self::new(
            name,
            ColumnKind::Categorical,
            values
                .into_iter()
                .map(|v| v.map_or(CellValue::Missing, |s| CellValue::Text(s.into())))
                .collect(),
        )
    }

    /// Infers the column type from raw cells.
    ///
    /// Numbers win when every non-empty cell is numeric, then dates,
    /// otherwise the column is categorical. An all-empty column is numeric.
    pub fn infer(name: impl Into<String>, raw: Vec<RawCell>) -> Self {
        let raw: Vec<RawCell> = raw
            .into_iter()
            .map(|c| match c {
                RawCell::Text(s) if s.trim().is_empty() => RawCell::Empty,
                other => other,
            })
            .collect();

        let all_numeric = raw.iter().all(|c| match c {
            RawCell::Empty | RawCell::Number(_) => true,
            RawCell::Text(s) => parse_number(s).is_some(),
            RawCell::DateTime(_) => false,
        });
        if all_numeric {
            let values = raw
                .iter()
                .map(|c| match c {
                    RawCell::Number(n) if n.is_finite() => CellValue::Number(*n),
                    RawCell::Text(s) => parse_number(s).map_or(CellValue::Missing, CellValue::Number),
                    _ => CellValue::Missing,
                })
                .collect();
            return Self::new(name, ColumnKind::Numeric, values);
        }

        let all_dates = raw.iter().all(|c| match c {
            RawCell::Empty | RawCell::DateTime(_) => true,
            RawCell::Text(s) => parse_date(s).is_some(),
            RawCell::Number(_) => false,
        });
        if all_dates {
            let values = raw
                .iter()
                .map(|c| match c {
                    RawCell::DateTime(d) => CellValue::Date(*d),
                    RawCell::Text(s) => parse_date(s).map_or(CellValue::Missing, CellValue::Date),
                    _ => CellValue::Missing,
                })
                .collect();
            return Self::new(name, ColumnKind::Date, values);
        }

        let values = raw
            .into_iter()
            .map(|c| match c {
                RawCell::Empty => CellValue::Missing,
                RawCell::Text(s) => CellValue::Text(s),
                RawCell::Number(n) => CellValue::Text(CellValue::Number(n).to_string()),
                RawCell::DateTime(d) => CellValue::Text(CellValue::Date(d).to_string()),
            })
            .collect();
        Self::new(name, ColumnKind::Categorical, values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Numeric
    }

    /// Non-missing numeric values in row order.
    pub fn numbers(&self) -> Vec<f64> {
        self.values.iter().filter_map(CellValue::as_number).collect()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Distinct non-missing display values, sorted.
    pub fn distinct_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.iter().filter_map(CellValue::key).collect();
        keys.sort();
        keys.dedup();
        keys
    }
}
