//! Report building blocks shared by every analysis screen.
//!
//! A [`Report`] is presentation-neutral: tables of display strings, chart
//! descriptions and interpretation lines. Adapters turn it into CSV, PDF or
//! JSON without recomputing anything.

use serde::{Deserialize, Serialize};

/// Tabular result ready for display or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_headers(title: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            title: title.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Formats a number with two decimals, the convention used across reports.
pub fn fmt2(value: f64) -> String {
    if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// Formats an optional statistic, using `-` when undefined.
pub fn fmt_opt(value: Option<f64>) -> String {
    value.map(fmt2).unwrap_or_else(|| "-".to_string())
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Bar,
    Line,
    Scatter,
    Box,
}

/// Data carried by a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SeriesData {
    /// One value per labelled category.
    Categorical { labels: Vec<String>, values: Vec<f64> },
    /// Numeric x/y pairs.
    Xy { points: Vec<(f64, f64)> },
    /// Raw samples per group, summarised as boxes.
    Samples { groups: Vec<(String, Vec<f64>)> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub data: SeriesData,
    /// Plotted against the right-hand axis.
    #[serde(default)]
    pub secondary_axis: bool,
}

impl Series {
    pub fn categorical(
        name: impl Into<String>,
        kind: SeriesKind,
        labels: Vec<String>,
        values: Vec<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            data: SeriesData::Categorical { labels, values },
            secondary_axis: false,
        }
    }

    pub fn xy(name: impl Into<String>, kind: SeriesKind, points: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.into(),
            kind,
            data: SeriesData::Xy { points },
            secondary_axis: false,
        }
    }

    pub fn samples(name: impl Into<String>, groups: Vec<(String, Vec<f64>)>) -> Self {
        Self {
            name: name.into(),
            kind: SeriesKind::Box,
            data: SeriesData::Samples { groups },
            secondary_axis: false,
        }
    }

    pub fn on_secondary_axis(mut self) -> Self {
        self.secondary_axis = true;
        self
    }
}

/// Horizontal reference line (control limits, the 80% line).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub label: String,
    pub value: f64,
    #[serde(default)]
    pub secondary_axis: bool,
}

/// Plot description: axes, series and reference lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    #[serde(default)]
    pub guides: Vec<Guide>,
}

impl PlotSpec {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            series: Vec::new(),
            guides: Vec::new(),
        }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_guide(mut self, label: impl Into<String>, value: f64) -> Self {
        self.guides.push(Guide {
            label: label.into(),
            value,
            secondary_axis: false,
        });
        self
    }

    pub fn with_secondary_guide(mut self, label: impl Into<String>, value: f64) -> Self {
        self.guides.push(Guide {
            label: label.into(),
            value,
            secondary_axis: true,
        });
        self
    }
}

/// Directed graph in Graphviz DOT form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSpec {
    pub title: String,
    pub dot: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Chart {
    Plot(PlotSpec),
    Graph(GraphSpec),
}

/// Export formats offered for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// Complete result of one analysis render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub description: Option<String>,
    pub charts: Vec<Chart>,
    pub tables: Vec<Table>,
    pub interpretation: Vec<String>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            charts: Vec::new(),
            tables: Vec::new(),
            interpretation: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_chart(mut self, chart: Chart) -> Self {
        self.charts.push(chart);
        self
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    pub fn with_interpretation<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interpretation.extend(lines.into_iter().map(Into::into));
        self
    }

    /// The table exported when CSV is requested.
    pub fn primary_table(&self) -> Option<&Table> {
        self.tables.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt2_rounds_and_handles_infinity() {
        assert_eq!(fmt2(4.3781), "4.38");
        assert_eq!(fmt2(f64::INFINITY), "inf");
        assert_eq!(fmt_opt(None), "-");
    }

    #[test]
    fn chart_serializes_with_type_tag() {
        let chart = Chart::Graph(GraphSpec {
            title: "Fishbone".to_string(),
            dot: "digraph {}".to_string(),
        });
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["type"], "graph");
    }

    #[test]
    fn export_format_metadata() {
        assert_eq!(ExportFormat::Pdf.extension(), "pdf");
        assert_eq!(ExportFormat::Csv.content_type(), "text/csv");
        let parsed: ExportFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, ExportFormat::Csv);
    }

    #[test]
    fn primary_table_is_first_table() {
        let report = Report::new("r")
            .with_table(Table::new("first", &["a"]))
            .with_table(Table::new("second", &["b"]));
        assert_eq!(report.primary_table().map(|t| t.title.as_str()), Some("first"));
    }
}
