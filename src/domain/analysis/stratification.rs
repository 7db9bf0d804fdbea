//! Stratification - a numeric column broken down by a categorical one.

use std::collections::BTreeMap;

use super::errors::AnalysisError;
use crate::domain::dataset::Dataset;
use crate::domain::report::{fmt2, fmt_opt, Chart, PlotSpec, Report, Series, SeriesKind, Table};
use crate::domain::stats;

#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub group: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Absent for single-member groups.
    pub std: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stratification {
    pub value_column: String,
    pub group_column: String,
    pub groups: Vec<GroupStats>,
    pub samples: Vec<(String, Vec<f64>)>,
}

pub struct StratificationAnalyzer;

impl StratificationAnalyzer {
    pub fn analyze(
        dataset: &Dataset,
        value_column: &str,
        group_column: &str,
    ) -> Result<Stratification, AnalysisError> {
        let values = dataset.numeric_column(value_column)?;
        let groups = dataset.column(group_column)?;

        let mut samples: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for (g, v) in groups.values.iter().zip(&values.values) {
            if let (Some(key), Some(n)) = (g.key(), v.as_number()) {
                samples.entry(key).or_default().push(n);
            }
        }
        if samples.is_empty() {
            return Err(AnalysisError::computation(format!(
                "No rows have both '{}' and '{}'",
                value_column, group_column
            )));
        }

        let groups = samples
            .iter()
            .filter_map(|(group, data)| {
                Some(GroupStats {
                    group: group.clone(),
                    count: data.len(),
                    mean: stats::mean(data)?,
                    median: stats::median(data)?,
                    min: stats::min(data)?,
                    max: stats::max(data)?,
                    std: stats::std_dev(data),
                })
            })
            .collect();

        Ok(Stratification {
            value_column: value_column.to_string(),
            group_column: group_column.to_string(),
            groups,
            samples: samples.into_iter().collect(),
        })
    }
}

impl Stratification {
    /// Group with the most observations; the first by name on ties.
    pub fn largest_group(&self) -> Option<&GroupStats> {
        self.groups
            .iter()
            .reduce(|best, g| if g.count > best.count { g } else { best })
    }

    pub fn highest_mean_group(&self) -> Option<&GroupStats> {
        self.groups
            .iter()
            .reduce(|best, g| if g.mean > best.mean { g } else { best })
    }

    pub fn interpretation(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{} stratified by {} across {} groups.",
            self.value_column,
            self.group_column,
            self.groups.len()
        )];
        if let Some(g) = self.largest_group() {
            lines.push(format!("Group with the most observations: {} ({}).", g.group, g.count));
        }
        if let Some(g) = self.highest_mean_group() {
            lines.push(format!("Group with the highest mean: {} ({}).", g.group, fmt2(g.mean)));
        }
        lines
    }

    pub fn to_report(&self) -> Report {
        let mut table = Table::with_headers(
            "Statistics by group",
            vec![
                self.group_column.clone(),
                "Count".to_string(),
                "Mean".to_string(),
                "Median".to_string(),
                "Minimum".to_string(),
                "Maximum".to_string(),
                "Std deviation".to_string(),
            ],
        );
        for g in &self.groups {
            table.push_row(vec![
                g.group.clone(),
                g.count.to_string(),
                fmt2(g.mean),
                fmt2(g.median),
                fmt2(g.min),
                fmt2(g.max),
                fmt_opt(g.std),
            ]);
        }

        let boxes = PlotSpec::new(
            format!("Distribution of {} by {}", self.value_column, self.group_column),
            self.group_column.clone(),
            self.value_column.clone(),
        )
        .with_series(Series::samples(self.value_column.clone(), self.samples.clone()));

        let labels: Vec<String> = self.groups.iter().map(|g| g.group.clone()).collect();
        let bars = PlotSpec::new(
            format!("Mean and count of {} by {}", self.value_column, self.group_column),
            self.group_column.clone(),
            "Mean",
        )
        .with_series(Series::categorical(
            "Mean",
            SeriesKind::Bar,
            labels.clone(),
            self.groups.iter().map(|g| g.mean).collect(),
        ))
        .with_series(
            Series::categorical(
                "Count",
                SeriesKind::Line,
                labels,
                self.groups.iter().map(|g| g.count as f64).collect(),
            )
            .on_secondary_axis(),
        );

        Report::new("Stratification analysis")
            .with_chart(Chart::Plot(boxes))
            .with_chart(Chart::Plot(bars))
            .with_table(table)
            .with_interpretation(self.interpretation())
    }
}
