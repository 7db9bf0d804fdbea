//! Production dashboard - KPIs, control bands and distributions per variable.

use super::errors::AnalysisError;
use super::histogram::bins_series;
use crate::domain::dataset::Dataset;
use crate::domain::report::{fmt2, Chart, PlotSpec, Report, Series, SeriesKind, Table};
use crate::domain::stats::{self, Bin};

pub const DEFAULT_TITLE: &str = "Production Analysis Dashboard";
pub const DEFAULT_DESCRIPTION: &str = "Detailed analysis of process metrics";

#[derive(Debug, Clone, PartialEq)]
pub struct Kpi {
    pub variable: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// `mean ± 1·std`; collapses to the mean when std is undefined.
    pub band: (f64, f64),
    pub series: Vec<(f64, f64)>,
    pub bins: Vec<Bin>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub title: String,
    pub description: String,
    pub kpis: Vec<Kpi>,
}

/// Default variables: numeric columns at positions 2 and 3, else the
/// first two numeric columns.
pub fn default_variables(dataset: &Dataset) -> Vec<String> {
    let positional: Vec<String> = dataset
        .columns()
        .iter()
        .skip(2)
        .take(2)
        .filter(|c| c.is_numeric())
        .map(|c| c.name.clone())
        .collect();
    if !positional.is_empty() {
        return positional;
    }
    dataset.numeric_names().into_iter().take(2).collect()
}

pub struct DashboardBuilder;

impl DashboardBuilder {
    pub fn build(
        dataset: &Dataset,
        title: Option<&str>,
        description: Option<&str>,
        variables: &[String],
    ) -> Result<Dashboard, AnalysisError> {
        let variables = if variables.is_empty() {
            default_variables(dataset)
        } else {
            variables.to_vec()
        };
        if variables.is_empty() {
            return Err(AnalysisError::computation(
                "The dataset has no numeric columns for the dashboard",
            ));
        }

        let kpis = variables
            .iter()
            .map(|variable| -> Result<Kpi, AnalysisError> {
                let column = dataset.numeric_column(variable)?;
                let series: Vec<(f64, f64)> = column
                    .values
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| v.as_number().map(|n| ((i + 1) as f64, n)))
                    .collect();
                let data: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
                let no_data = || {
                    AnalysisError::computation(format!("Column '{}' has no numeric values", variable))
                };
                let mean = stats::mean(&data).ok_or_else(no_data)?;
                let std = stats::std_dev(&data).unwrap_or(0.0);
                Ok(Kpi {
                    variable: variable.clone(),
                    mean,
                    min: stats::min(&data).ok_or_else(no_data)?,
                    max: stats::max(&data).ok_or_else(no_data)?,
                    band: (mean - std, mean + std),
                    bins: stats::histogram(&data).ok_or_else(no_data)?,
                    series,
                })
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;

        Ok(Dashboard {
            title: non_blank(title).unwrap_or(DEFAULT_TITLE).to_string(),
            description: non_blank(description).unwrap_or(DEFAULT_DESCRIPTION).to_string(),
            kpis,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Dashboard {
    pub fn kpi_table(&self) -> Table {
        let mut table = Table::new("Key indicators", &["Variable", "Mean", "Min", "Max"]);
        for kpi in &self.kpis {
            table.push_row(vec![
                kpi.variable.clone(),
                fmt2(kpi.mean),
                fmt2(kpi.min),
                fmt2(kpi.max),
            ]);
        }
        table
    }

    pub fn to_report(&self) -> Report {
        let mut report = Report::new(self.title.clone())
            .with_description(self.description.clone())
            .with_table(self.kpi_table());
        for kpi in &self.kpis {
            let control = PlotSpec::new(format!("Control chart - {}", kpi.variable), "Sample", kpi.variable.clone())
                .with_series(Series::xy(kpi.variable.clone(), SeriesKind::Line, kpi.series.clone()))
                .with_guide("Mean + 1σ", kpi.band.1)
                .with_guide("Mean", kpi.mean)
                .with_guide("Mean - 1σ", kpi.band.0);
            let distribution = PlotSpec::new(format!("Distribution of {}", kpi.variable), kpi.variable.clone(), "Frequency")
                .with_series(bins_series("Frequency", &kpi.bins));
            report = report
                .with_chart(Chart::Plot(control))
                .with_chart(Chart::Plot(distribution));
        }
        report.with_interpretation(self.kpis.iter().map(|k| {
            format!(
                "{}: mean {} (min {} | max {})",
                k.variable,
                fmt2(k.mean),
                fmt2(k.min),
                fmt2(k.max)
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::Column;

    fn production() -> Dataset {
        Dataset::new(
            "prod.csv",
            vec![
                Column::categorical("Lote", vec![Some("L1"), Some("L2"), Some("L3")]),
                Column::numeric("Hora", vec![Some(1.0), Some(2.0), Some(3.0)]),
                Column::numeric("Temperatura", vec![Some(70.0), Some(72.0), Some(74.0)]),
                Column::categorical("Operador", vec![Some("a"), Some("b"), Some("c")]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn defaults_pick_numeric_columns_at_positions_two_and_three() {
        assert_eq!(default_variables(&production()), vec!["Temperatura".to_string()]);
    }

    #[test]
    fn defaults_fall_back_to_first_numeric_columns() {
        let ds = Dataset::new(
            "x",
            vec![
                Column::numeric("a", vec![Some(1.0)]),
                Column::numeric("b", vec![Some(2.0)]),
            ],
        )
        .unwrap();
        assert_eq!(default_variables(&ds), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn kpis_and_band() {
        let d = DashboardBuilder::build(&production(), None, Some("  "), &[]).unwrap();
        assert_eq!(d.title, DEFAULT_TITLE);
        assert_eq!(d.description, DEFAULT_DESCRIPTION);
        let kpi = &d.kpis[0];
        assert!((kpi.mean - 72.0).abs() < 1e-9);
        assert!((kpi.band.0 - 70.0).abs() < 1e-9);
        assert!((kpi.band.1 - 74.0).abs() < 1e-9);
    }

    #[test]
    fn explicit_categorical_variable_is_rejected() {
        let result = DashboardBuilder::build(&production(), None, None, &["Operador".to_string()]);
        assert!(matches!(result, Err(AnalysisError::Dataset(_))));
    }

    #[test]
    fn report_has_two_charts_per_variable() {
        let d = DashboardBuilder::build(&production(), Some("Line 1"), None, &[
            "Hora".to_string(),
            "Temperatura".to_string(),
        ])
        .unwrap();
        let report = d.to_report();
        assert_eq!(report.title, "Line 1");
        assert_eq!(report.charts.len(), 4);
        assert_eq!(report.tables[0].rows.len(), 2);
    }
}
