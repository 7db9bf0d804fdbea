//! Checklist sheet - a small typed data-collection form held in the session.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use super::errors::AnalysisError;
use super::histogram::{bins_series, summary_table};
use crate::domain::dataset::{parse_number, CellValue};
use crate::domain::foundation::{Timestamp, ValidationError};
use crate::domain::report::{fmt2, Chart, PlotSpec, Report, Series, SeriesKind, Table};
use crate::domain::stats::{self, NumericSummary};

pub const MAX_FIELDS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetKind {
    DefectCount,
    EventLog,
    ProcessControl,
    FrequencyAnalysis,
}

impl SheetKind {
    pub fn label(&self) -> &'static str {
        match self {
            SheetKind::DefectCount => "Defect count",
            SheetKind::EventLog => "Event log",
            SheetKind::ProcessControl => "Process control",
            SheetKind::FrequencyAnalysis => "Frequency analysis",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Numeric,
    Category,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    /// Allowed values for category fields; empty accepts any text.
    #[serde(default)]
    pub options: Vec<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            options: Vec::new(),
        }
    }

    pub fn category(name: impl Into<String>, options: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Category,
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    fn parse(&self, raw: &str) -> Result<CellValue, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::empty_field(&self.name));
        }
        match self.kind {
            FieldKind::Text => Ok(CellValue::Text(raw.to_string())),
            FieldKind::Numeric => parse_number(raw)
                .map(CellValue::Number)
                .ok_or_else(|| ValidationError::invalid_format(&self.name, "expected a number")),
            FieldKind::Category => {
                if self.options.is_empty() || self.options.iter().any(|o| o == raw) {
                    Ok(CellValue::Text(raw.to_string()))
                } else {
                    Err(ValidationError::invalid_format(
                        &self.name,
                        format!("'{}' is not one of: {}", raw, self.options.join(", ")),
                    ))
                }
            }
            FieldKind::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|d| CellValue::Date(d.and_time(NaiveTime::MIN)))
                .map_err(|_| ValidationError::invalid_format(&self.name, "expected YYYY-MM-DD")),
        }
    }
}

/// Analysis of one checklist field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldAnalysis {
    Numeric {
        field: String,
        bins: Vec<stats::Bin>,
        summary: NumericSummary,
    },
    Frequency {
        field: String,
        counts: Vec<(String, usize)>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistSheet {
    pub kind: SheetKind,
    pub title: String,
    pub fields: Vec<FieldSpec>,
    pub records: Vec<Vec<CellValue>>,
    pub created_at: Timestamp,
}

impl ChecklistSheet {
    /// Creates a sheet with 1 to 10 uniquely named fields.
    pub fn new(
        kind: SheetKind,
        title: impl Into<String>,
        fields: Vec<FieldSpec>,
    ) -> Result<Self, ValidationError> {
        if fields.is_empty() || fields.len() > MAX_FIELDS {
            return Err(ValidationError::out_of_range(
                "fields",
                1,
                MAX_FIELDS as i64,
                fields.len() as i64,
            ));
        }
        let mut seen = HashSet::new();
        for field in &fields {
            if field.name.trim().is_empty() {
                return Err(ValidationError::empty_field("field name"));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(ValidationError::invalid_format(
                    "fields",
                    format!("duplicate field '{}'", field.name),
                ));
            }
        }
        let title = title.into();
        Ok(Self {
            kind,
            title: if title.trim().is_empty() {
                kind.label().to_string()
            } else {
                title
            },
            fields,
            records: Vec::new(),
            created_at: Timestamp::now(),
        })
    }

    /// Validates every field against its type and appends the record.
    pub fn add_record(&mut self, values: &HashMap<String, String>) -> Result<(), ValidationError> {
        let record = self
            .fields
            .iter()
            .map(|f| f.parse(values.get(&f.name).map(String::as_str).unwrap_or("")))
            .collect::<Result<Vec<_>, _>>()?;
        self.records.push(record);
        Ok(())
    }

    fn field_index(&self, name: &str) -> Result<usize, AnalysisError> {
        self.fields.iter().position(|f| f.name == name).ok_or_else(|| {
            AnalysisError::computation(format!("Field '{}' is not part of the sheet", name))
        })
    }

    /// Numeric fields get a histogram; every other field a frequency table.
    pub fn analyse_field(&self, name: &str) -> Result<FieldAnalysis, AnalysisError> {
        let idx = self.field_index(name)?;
        if self.records.is_empty() {
            return Err(AnalysisError::computation("The sheet has no records yet"));
        }
        let values = self.records.iter().filter_map(|r| r.get(idx));

        if self.fields[idx].kind == FieldKind::Numeric {
            let data: Vec<f64> = values.filter_map(CellValue::as_number).collect();
            let no_data = || AnalysisError::computation(format!("Field '{}' has no values", name));
            return Ok(FieldAnalysis::Numeric {
                field: name.to_string(),
                bins: stats::histogram(&data).ok_or_else(no_data)?,
                summary: NumericSummary::of(&data).ok_or_else(no_data)?,
            });
        }

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for key in values.filter_map(CellValue::key) {
            *counts.entry(key).or_insert(0) += 1;
        }
        let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(FieldAnalysis::Frequency {
            field: name.to_string(),
            counts,
        })
    }

    pub fn records_table(&self) -> Table {
        let mut table = Table::with_headers(
            self.title.clone(),
            self.fields.iter().map(|f| f.name.clone()).collect(),
        );
        for record in &self.records {
            table.push_row(record.iter().map(ToString::to_string).collect());
        }
        table
    }
}

impl FieldAnalysis {
    pub fn to_report(&self) -> Report {
        match self {
            FieldAnalysis::Numeric {
                field,
                bins,
                summary,
            } => {
                let plot = PlotSpec::new(format!("Distribution of {}", field), field.clone(), "Frequency")
                    .with_series(bins_series("Frequency", bins));
                Report::new(format!("Checklist field - {}", field))
                    .with_chart(Chart::Plot(plot))
                    .with_table(summary_table("Descriptive statistics", summary))
                    .with_interpretation([format!(
                        "{} records, mean {}.",
                        summary.count,
                        fmt2(summary.mean)
                    )])
            }
            FieldAnalysis::Frequency { field, counts } => {
                let mut table = Table::new("Frequency", &["Value", "Count"]);
                for (value, count) in counts {
                    table.push_row(vec![value.clone(), count.to_string()]);
                }
                let plot = PlotSpec::new(format!("Frequency of {}", field), field.clone(), "Count")
                    .with_series(Series::categorical(
                        "Count",
                        SeriesKind::Bar,
                        counts.iter().map(|(v, _)| v.clone()).collect(),
                        counts.iter().map(|(_, c)| *c as f64).collect(),
                    ));
                let mut report = Report::new(format!("Checklist field - {}", field))
                    .with_chart(Chart::Plot(plot))
                    .with_table(table);
                if let Some((top, n)) = counts.first() {
                    report = report.with_interpretation([format!("Most frequent value: {} ({}).", top, n)]);
                }
                report
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> ChecklistSheet {
        ChecklistSheet::new(
            SheetKind::DefectCount,
            "Line 3 defects",
            vec![
                FieldSpec::category("Defect", &["Scratch", "Dent"]),
                FieldSpec::new("Count", FieldKind::Numeric),
                FieldSpec::new("Date", FieldKind::Date),
            ],
        )
        .unwrap()
    }

    fn record(defect: &str, count: &str, date: &str) -> HashMap<String, String> {
        HashMap::from([
            ("Defect".to_string(), defect.to_string()),
            ("Count".to_string(), count.to_string()),
            ("Date".to_string(), date.to_string()),
        ])
    }

    #[test]
    fn field_count_must_be_between_one_and_ten() {
        assert!(ChecklistSheet::new(SheetKind::EventLog, "x", vec![]).is_err());
        let many = (0..11)
            .map(|i| FieldSpec::new(format!("f{}", i), FieldKind::Text))
            .collect();
        assert!(ChecklistSheet::new(SheetKind::EventLog, "x", many).is_err());
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let fields = vec![
            FieldSpec::new("a", FieldKind::Text),
            FieldSpec::new("a", FieldKind::Numeric),
        ];
        assert!(ChecklistSheet::new(SheetKind::EventLog, "x", fields).is_err());
    }

    #[test]
    fn blank_title_defaults_to_kind_label() {
        let s = ChecklistSheet::new(
            SheetKind::ProcessControl,
            " ",
            vec![FieldSpec::new("a", FieldKind::Text)],
        )
        .unwrap();
        assert_eq!(s.title, "Process control");
    }

    #[test]
    fn records_are_validated_per_field_type() {
        let mut s = sheet();
        s.add_record(&record("Scratch", "3", "2024-05-01")).unwrap();
        assert!(s.add_record(&record("Crack", "3", "2024-05-01")).is_err());
        assert!(s.add_record(&record("Dent", "three", "2024-05-01")).is_err());
        assert!(s.add_record(&record("Dent", "1", "01/05/2024")).is_err());
        assert_eq!(s.records.len(), 1);
        assert_eq!(s.records_table().rows[0], vec!["Scratch", "3", "2024-05-01"]);
    }

    #[test]
    fn numeric_field_analysis_has_summary() {
        let mut s = sheet();
        for (d, c) in [("Scratch", "2"), ("Dent", "4"), ("Scratch", "6")] {
            s.add_record(&record(d, c, "2024-05-01")).unwrap();
        }
        match s.analyse_field("Count").unwrap() {
            FieldAnalysis::Numeric { summary, .. } => assert!((summary.mean - 4.0).abs() < 1e-9),
            other => panic!("unexpected {:?}", other),
        }
        match s.analyse_field("Defect").unwrap() {
            FieldAnalysis::Frequency { counts, .. } => {
                assert_eq!(counts[0], ("Scratch".to_string(), 2));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn analysing_empty_sheet_or_unknown_field_fails() {
        let s = sheet();
        assert!(s.analyse_field("Count").is_err());
        assert!(s.analyse_field("Nope").is_err());
    }
}
