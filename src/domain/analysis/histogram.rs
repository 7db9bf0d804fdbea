//! Histogram - frequency distribution of one numeric column.

use super::errors::AnalysisError;
use crate::domain::dataset::Dataset;
use crate::domain::report::{fmt2, fmt_opt, Chart, PlotSpec, Report, Series, SeriesKind, Table};
use crate::domain::stats::{self, Bin, NumericSummary};

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramAnalysis {
    pub column: String,
    pub bins: Vec<Bin>,
    pub summary: NumericSummary,
}

pub struct HistogramAnalyzer;

impl HistogramAnalyzer {
    pub fn analyze(dataset: &Dataset, column: &str) -> Result<HistogramAnalysis, AnalysisError> {
        let data = dataset.numeric_column(column)?.numbers();
        let no_data = || AnalysisError::computation(format!("Column '{}' has no numeric values", column));
        let bins = stats::histogram(&data).ok_or_else(no_data)?;
        let summary = NumericSummary::of(&data).ok_or_else(no_data)?;
        Ok(HistogramAnalysis {
            column: column.to_string(),
            bins,
            summary,
        })
    }
}

/// Label for a bin, e.g. `[1.00, 2.50)`.
pub fn bin_label(bin: &Bin, last: bool) -> String {
    format!(
        "[{}, {}{}",
        fmt2(bin.lower),
        fmt2(bin.upper),
        if last { "]" } else { ")" }
    )
}

/// Bar series for a set of bins.
pub fn bins_series(name: &str, bins: &[Bin]) -> Series {
    let last = bins.len().saturating_sub(1);
    Series::categorical(
        name,
        SeriesKind::Bar,
        bins.iter()
            .enumerate()
            .map(|(i, b)| bin_label(b, i == last))
            .collect(),
        bins.iter().map(|b| b.count as f64).collect(),
    )
}

/// Two-column metric table for a numeric summary.
pub fn summary_table(title: &str, s: &NumericSummary) -> Table {
    let mut table = Table::new(title, &["Metric", "Value"]);
    for (metric, value) in [
        ("Mean", fmt2(s.mean)),
        ("Median", fmt2(s.median)),
        ("Standard deviation", fmt_opt(s.std)),
        ("Minimum", fmt2(s.min)),
        ("Maximum", fmt2(s.max)),
        ("Range", fmt2(s.range())),
        ("Variance", fmt_opt(s.variance)),
    ] {
        table.push_row(vec![metric.to_string(), value]);
    }
    table
}

impl HistogramAnalysis {
    pub fn interpretation(&self) -> Vec<String> {
        let s = &self.summary;
        vec![
            format!("Analysis of {}:", self.column),
            format!(
                "Central value: the mean of {} marks the centre of the distribution.",
                fmt2(s.mean)
            ),
            format!(
                "Variability: a standard deviation of {} describes the spread of the data.",
                fmt_opt(s.std)
            ),
            format!("Range: values vary between {} and {}.", fmt2(s.min), fmt2(s.max)),
        ]
    }

    pub fn to_report(&self) -> Report {
        let plot = PlotSpec::new(
            format!("Histogram of {}", self.column),
            self.column.clone(),
            "Frequency",
        )
        .with_series(bins_series("Frequency", &self.bins))
        .with_guide("Mean", self.summary.mean);

        let mut bins = Table::new("Frequency distribution", &["Bin", "Frequency"]);
        let last = self.bins.len().saturating_sub(1);
        for (i, bin) in self.bins.iter().enumerate() {
            bins.push_row(vec![bin_label(bin, i == last), bin.count.to_string()]);
        }

        Report::new(format!("Histogram - {}", self.column))
            .with_chart(Chart::Plot(plot))
            .with_table(summary_table("Statistical summary", &self.summary))
            .with_table(bins)
            .with_interpretation(self.interpretation())
    }
}
