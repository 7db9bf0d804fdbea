//! X-bar control chart with three-sigma limits.

use super::errors::AnalysisError;
use crate::domain::dataset::Dataset;
use crate::domain::report::{fmt2, Chart, PlotSpec, Report, Series, SeriesKind, Table};
use crate::domain::stats;

/// Width of the control band in standard errors.
pub const SIGMA_MULTIPLIER: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlLimits {
    pub center: f64,
    pub upper: f64,
    pub lower: f64,
    pub std: f64,
}

impl ControlLimits {
    /// Center at the mean, limits at `mean ± 3·std/√n`.
    ///
    /// Fewer than two samples gives a zero standard deviation.
    pub fn from_samples(data: &[f64]) -> Option<Self> {
        let center = stats::mean(data)?;
        let std = stats::std_dev(data).unwrap_or(0.0);
        let half_width = SIGMA_MULTIPLIER * std / (data.len() as f64).sqrt();
        Some(Self {
            center,
            upper: center + half_width,
            lower: center - half_width,
            std,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    /// Zero-based row in the dataset.
    pub row: usize,
    pub value: f64,
    pub out_of_control: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlChart {
    pub column: String,
    pub limits: ControlLimits,
    pub points: Vec<ControlPoint>,
}

pub struct ControlChartAnalyzer;

impl ControlChartAnalyzer {
    pub fn analyze(dataset: &Dataset, column: &str) -> Result<ControlChart, AnalysisError> {
        let samples: Vec<(usize, f64)> = dataset
            .numeric_column(column)?
            .values
            .iter()
            .enumerate()
            .filter_map(|(row, v)| v.as_number().map(|n| (row, n)))
            .collect();
        let data: Vec<f64> = samples.iter().map(|(_, v)| *v).collect();
        let limits = ControlLimits::from_samples(&data).ok_or_else(|| {
            AnalysisError::computation(format!("Column '{}' has no numeric values", column))
        })?;

        let points = samples
            .into_iter()
            .map(|(row, value)| ControlPoint {
                row,
                value,
                out_of_control: !limits.contains(value),
            })
            .collect();

        Ok(ControlChart {
            column: column.to_string(),
            limits,
            points,
        })
    }
}

impl ControlChart {
    pub fn out_of_control_count(&self) -> usize {
        self.points.iter().filter(|p| p.out_of_control).count()
    }

    pub fn interpretation(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Quality control analysis for {}:", self.column),
            format!("Mean: {}", fmt2(self.limits.center)),
            format!("Upper control limit: {}", fmt2(self.limits.upper)),
            format!("Lower control limit: {}", fmt2(self.limits.lower)),
            format!("Samples out of control: {}", self.out_of_control_count()),
        ];
        if self.out_of_control_count() > 0 {
            lines.push("ALERT: there are samples outside the control limits".to_string());
        }
        lines
    }

    pub fn to_report(&self) -> Report {
        let series: Vec<(f64, f64)> = self
            .points
            .iter()
            .map(|p| ((p.row + 1) as f64, p.value))
            .collect();
        let flagged: Vec<(f64, f64)> = self
            .points
            .iter()
            .filter(|p| p.out_of_control)
            .map(|p| ((p.row + 1) as f64, p.value))
            .collect();

        let mut plot = PlotSpec::new(
            format!("Control chart - {}", self.column),
            "Sample",
            self.column.clone(),
        )
        .with_series(Series::xy(self.column.clone(), SeriesKind::Line, series))
        .with_guide("UCL", self.limits.upper)
        .with_guide("Mean", self.limits.center)
        .with_guide("LCL", self.limits.lower);
        if !flagged.is_empty() {
            plot = plot.with_series(Series::xy("Out of control", SeriesKind::Scatter, flagged));
        }

        let mut limits = Table::new("Control limits", &["Metric", "Value"]);
        limits.push_row(vec!["Mean".to_string(), fmt2(self.limits.center)]);
        limits.push_row(vec!["Upper control limit".to_string(), fmt2(self.limits.upper)]);
        limits.push_row(vec!["Lower control limit".to_string(), fmt2(self.limits.lower)]);
        limits.push_row(vec!["Standard deviation".to_string(), fmt2(self.limits.std)]);

        let mut outliers = Table::new("Out-of-control samples", &["Sample", "Value"]);
        for p in self.points.iter().filter(|p| p.out_of_control) {
            outliers.push_row(vec![(p.row + 1).to_string(), fmt2(p.value)]);
        }

        Report::new(format!("Control chart - {}", self.column))
            .with_chart(Chart::Plot(plot))
            .with_table(limits)
            .with_table(outliers)
            .with_interpretation(self.interpretation())
    }
}
