//! CSV export of a report's primary table.

use crate::domain::foundation::DomainError;
use crate::domain::report::{ExportFormat, Report, Table};
use crate::ports::ReportExporter;

use super::ExportError;

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvReportExporter;

impl CsvReportExporter {
    pub fn new() -> Self {
        Self
    }
}

pub(crate) fn table_to_csv(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))
}

impl ReportExporter for CsvReportExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn render(&self, report: &Report) -> Result<Vec<u8>, DomainError> {
        let table = report
            .primary_table()
            .ok_or_else(|| ExportError::NothingToExport(report.title.clone()))?;
        Ok(table_to_csv(table)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn writes_headers_then_rows() {
        let mut table = Table::new("Pareto", &["Category", "Value"]);
        table.push_row(vec!["Scratch, deep".into(), "50".into()]);
        let report = Report::new("Pareto").with_table(table);

        let bytes = CsvReportExporter::new().render(&report).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "Category,Value\n\"Scratch, deep\",50\n");
    }

    #[test]
    fn report_without_table_is_rejected() {
        let err = CsvReportExporter::new()
            .render(&Report::new("Empty"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
