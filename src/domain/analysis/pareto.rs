//! Pareto analysis - ranking categories by their share of the total.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::errors::AnalysisError;
use crate::domain::dataset::Dataset;
use crate::domain::report::{fmt2, Chart, PlotSpec, Report, Series, SeriesKind, Table};

/// Cumulative percentage at or below which a category is one of the "critical few".
pub const CRITICAL_THRESHOLD: f64 = 80.0;

/// What is aggregated per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParetoMeasure {
    /// Number of rows per category.
    Count,
    /// Sum of a numeric column per category.
    Sum { value_column: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParetoRow {
    pub category: String,
    pub value: f64,
    /// Share of the total, rounded to two decimals.
    pub percentage: f64,
    pub cumulative: f64,
    pub critical: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParetoAnalysis {
    pub category_column: String,
    pub measure: ParetoMeasure,
    pub total: f64,
    pub rows: Vec<ParetoRow>,
}

/// Wording of the interpretation, picked from the category column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParetoContext {
    Defects,
    Times,
    Costs,
    General,
}

impl ParetoContext {
    pub fn from_column(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.contains("defect") {
            ParetoContext::Defects
        } else if name.contains("tiempo") || name.contains("time") {
            ParetoContext::Times
        } else if name.contains("costo") || name.contains("cost") {
            ParetoContext::Costs
        } else {
            ParetoContext::General
        }
    }

    pub fn lines(&self) -> [&'static str; 2] {
        match self {
            ParetoContext::Defects => [
                "Critical defects require immediate attention.",
                "Focus effort on reducing the main causes of defects.",
            ],
            ParetoContext::Times => [
                "The stages with the longest process time need optimisation.",
                "Look for improvement opportunities in the slowest processes.",
            ],
            ParetoContext::Costs => [
                "The items with the largest economic impact call for a strategic review.",
                "Prioritise actions that reduce the most significant costs.",
            ],
            ParetoContext::General => [
                "The most relevant categories of the analysis have been identified.",
                "Focus your efforts on the areas with the greatest impact.",
            ],
        }
    }
}

pub struct ParetoAnalyzer;

impl ParetoAnalyzer {
    /// Groups by category, ranks descending and accumulates percentages.
    ///
    /// Rows with a missing category are ignored. Ties are ordered by
    /// category name.
    pub fn analyze(
        dataset: &Dataset,
        category_column: &str,
        measure: ParetoMeasure,
    ) -> Result<ParetoAnalysis, AnalysisError> {
        let categories = dataset.column(category_column)?;
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();

        match &measure {
            ParetoMeasure::Count => {
                for key in categories.values.iter().filter_map(|v| v.key()) {
                    *totals.entry(key).or_insert(0.0) += 1.0;
                }
            }
            ParetoMeasure::Sum { value_column } => {
                let values = dataset.numeric_column(value_column)?;
                for (cat, val) in categories.values.iter().zip(&values.values) {
                    if let Some(key) = cat.key() {
                        *totals.entry(key).or_insert(0.0) += val.as_number().unwrap_or(0.0);
                    }
                }
            }
        }

        if totals.is_empty() {
            return Err(AnalysisError::computation(format!(
                "Column '{}' has no categories to rank",
                category_column
            )));
        }
        if let Some((name, _)) = totals.iter().find(|(_, v)| **v < 0.0) {
            return Err(AnalysisError::computation(format!(
                "Category '{}' has a negative total",
                name
            )));
        }
        let total: f64 = totals.values().sum();
        if total <= 0.0 {
            return Err(AnalysisError::computation("The total to rank is zero"));
        }

        let mut ranked: Vec<(String, f64)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut running = 0.0;
        let rows = ranked
            .into_iter()
            .map(|(category, value)| {
                running += value;
                let cumulative = running / total * 100.0;
                ParetoRow {
                    category,
                    value,
                    percentage: (value / total * 100.0 * 100.0).round() / 100.0,
                    cumulative,
                    critical: cumulative <= CRITICAL_THRESHOLD + 1e-9,
                }
            })
            .collect();

        Ok(ParetoAnalysis {
            category_column: category_column.to_string(),
            measure,
            total,
            rows,
        })
    }
}

impl ParetoAnalysis {
    pub fn critical_few(&self) -> impl Iterator<Item = &ParetoRow> {
        self.rows.iter().filter(|r| r.critical)
    }

    fn value_label(&self) -> String {
        match &self.measure {
            ParetoMeasure::Count => "Frequency".to_string(),
            ParetoMeasure::Sum { value_column } => value_column.clone(),
        }
    }

    pub fn interpretation(&self) -> Vec<String> {
        let mut lines: Vec<String> = ParetoContext::from_column(&self.category_column)
            .lines()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let critical: Vec<&str> = self.critical_few().map(|r| r.category.as_str()).collect();
        if critical.is_empty() {
            lines.push("No group of categories stays within 80% of the total.".to_string());
        } else {
            lines.push(format!(
                "{} of {} categories account for up to 80% of the total: {}.",
                critical.len(),
                self.rows.len(),
                critical.join(", ")
            ));
        }
        lines
    }

    pub fn to_report(&self) -> Report {
        let value_label = self.value_label();
        let mut table = Table::with_headers(
            "Pareto table",
            vec![
                self.category_column.clone(),
                value_label.clone(),
                "Percentage".to_string(),
                "Cumulative %".to_string(),
            ],
        );
        for row in &self.rows {
            table.push_row(vec![
                row.category.clone(),
                fmt2(row.value),
                fmt2(row.percentage),
                fmt2(row.cumulative),
            ]);
        }

        let mut critical = Table::new("Critical few", &["Category", "Value", "Cumulative %"]);
        for row in self.critical_few() {
            critical.push_row(vec![row.category.clone(), fmt2(row.value), fmt2(row.cumulative)]);
        }

        let labels: Vec<String> = self.rows.iter().map(|r| r.category.clone()).collect();
        let plot = PlotSpec::new(
            format!("Pareto diagram - {}", self.category_column),
            self.category_column.clone(),
            value_label.clone(),
        )
        .with_series(Series::categorical(
            value_label,
            SeriesKind::Bar,
            labels.clone(),
            self.rows.iter().map(|r| r.value).collect(),
        ))
        .with_series(
            Series::categorical(
                "Cumulative %",
                SeriesKind::Line,
                labels,
                self.rows.iter().map(|r| r.cumulative).collect(),
            )
            .on_secondary_axis(),
        )
        .with_secondary_guide("80%", CRITICAL_THRESHOLD);

        Report::new("Pareto analysis")
            .with_chart(Chart::Plot(plot))
            .with_table(table)
            .with_table(critical)
            .with_interpretation(self.interpretation())
    }
}
