//! Scatter diagram and Pearson correlation between two numeric columns.

use std::collections::BTreeMap;

use super::errors::AnalysisError;
use crate::domain::dataset::Dataset;
use crate::domain::foundation::ValidationError;
use crate::domain::report::{fmt2, Chart, PlotSpec, Report, Series, SeriesKind, Table};
use crate::domain::stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationStrength {
    Weak,
    Moderate,
    Strong,
}

impl CorrelationStrength {
    /// Buckets |r|: below 0.3 weak, below 0.7 moderate, otherwise strong.
    pub fn classify(r: f64) -> Self {
        let r = r.abs();
        if r < 0.3 {
            CorrelationStrength::Weak
        } else if r < 0.7 {
            CorrelationStrength::Moderate
        } else {
            CorrelationStrength::Strong
        }
    }

    pub fn describe(&self, r: f64) -> String {
        match self {
            CorrelationStrength::Weak => format!(
                "Weak correlation ({}): there is no strong linear relationship.",
                fmt2(r)
            ),
            CorrelationStrength::Moderate => format!(
                "Moderate correlation ({}): there is a partial linear relationship.",
                fmt2(r)
            ),
            CorrelationStrength::Strong => format!(
                "Strong correlation ({}): there is a significant linear relationship.",
                fmt2(r)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterAnalysis {
    pub x_column: String,
    pub y_column: String,
    pub color_by: Option<String>,
    pub points: Vec<ScatterPoint>,
    pub r: f64,
    pub strength: CorrelationStrength,
    pub mean_x: f64,
    pub mean_y: f64,
}

pub struct ScatterAnalyzer;

impl ScatterAnalyzer {
    /// Correlates two numeric columns over rows where both are present.
    pub fn analyze(
        dataset: &Dataset,
        x_column: &str,
        y_column: &str,
        color_by: Option<&str>,
    ) -> Result<ScatterAnalysis, AnalysisError> {
        if dataset.numeric_names().len() < 2 {
            return Err(AnalysisError::computation(
                "At least two numeric columns are required for the analysis",
            ));
        }
        if x_column == y_column {
            return Err(ValidationError::invalid_format(
                "y_column",
                "X and Y variables must be different",
            )
            .into());
        }
        let xs = dataset.numeric_column(x_column)?;
        let ys = dataset.numeric_column(y_column)?;
        let groups = color_by.map(|name| dataset.column(name)).transpose()?;

        let points: Vec<ScatterPoint> = (0..dataset.row_count())
            .filter_map(|row| {
                let x = xs.values[row].as_number()?;
                let y = ys.values[row].as_number()?;
                let group = groups.and_then(|g| g.values[row].key());
                Some(ScatterPoint { x, y, group })
            })
            .collect();

        if points.len() < 2 {
            return Err(AnalysisError::computation(
                "At least two complete (x, y) pairs are required",
            ));
        }
        let x: Vec<f64> = points.iter().map(|p| p.x).collect();
        let y: Vec<f64> = points.iter().map(|p| p.y).collect();
        let r = stats::pearson(&x, &y).ok_or_else(|| {
            AnalysisError::computation("Correlation is undefined for a constant column")
        })?;

        Ok(ScatterAnalysis {
            x_column: x_column.to_string(),
            y_column: y_column.to_string(),
            color_by: color_by.map(str::to_string),
            mean_x: stats::mean(&x).unwrap_or_default(),
            mean_y: stats::mean(&y).unwrap_or_default(),
            strength: CorrelationStrength::classify(r),
            r,
            points,
        })
    }
}

impl ScatterAnalysis {
    pub fn to_report(&self) -> Report {
        let mut plot = PlotSpec::new(
            format!("{} vs {}", self.y_column, self.x_column),
            self.x_column.clone(),
            self.y_column.clone(),
        );
        if self.color_by.is_some() {
            let mut by_group: BTreeMap<String, Vec<(f64, f64)>> = BTreeMap::new();
            for p in &self.points {
                let key = p.group.clone().unwrap_or_else(|| "(missing)".to_string());
                by_group.entry(key).or_default().push((p.x, p.y));
            }
            for (group, points) in by_group {
                plot = plot.with_series(Series::xy(group, SeriesKind::Scatter, points));
            }
        } else {
            plot = plot.with_series(Series::xy(
                "Observations",
                SeriesKind::Scatter,
                self.points.iter().map(|p| (p.x, p.y)).collect(),
            ));
        }

        let mut table = Table::new("Correlation", &["Metric", "Value"]);
        table.push_row(vec!["Correlation (r)".to_string(), fmt2(self.r)]);
        table.push_row(vec![format!("Mean {}", self.x_column), fmt2(self.mean_x)]);
        table.push_row(vec![format!("Mean {}", self.y_column), fmt2(self.mean_y)]);
        table.push_row(vec!["Pairs".to_string(), self.points.len().to_string()]);

        Report::new("Scatter diagram")
            .with_chart(Chart::Plot(plot))
            .with_table(table)
            .with_interpretation([self.strength.describe(self.r)])
    }
}
