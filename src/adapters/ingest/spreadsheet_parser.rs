//! Spreadsheet upload parser: first worksheet, first row as headers.

use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};
use std::io::Cursor;

use crate::domain::dataset::{Dataset, RawCell};
use crate::domain::foundation::DomainError;
use crate::ports::{extension_of, DatasetParser};

use super::table_builder::build_dataset;
use super::IngestError;

const EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

#[derive(Debug, Default, Clone, Copy)]
pub struct SpreadsheetDatasetParser;

impl SpreadsheetDatasetParser {
    pub fn new() -> Self {
        Self
    }

    fn read(&self, bytes: &[u8], filename: &str) -> Result<Dataset, IngestError> {
        if bytes.is_empty() {
            return Err(IngestError::Empty);
        }

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| IngestError::Spreadsheet(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(IngestError::Empty)?
            .map_err(|e| IngestError::Spreadsheet(e.to_string()))?;

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header) => header.iter().map(|c| c.to_string().trim().to_string()).collect(),
            None => return Err(IngestError::Empty),
        };
        let body = rows
            .map(|row| row.iter().map(raw_cell).collect())
            .collect();

        build_dataset(filename, headers, body)
    }
}

fn raw_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::Bool(b) => RawCell::Text(b.to_string()),
        Data::String(s) if s.trim().is_empty() => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::DateTime(_) => cell
            .as_datetime()
            .map_or_else(|| RawCell::Text(cell.to_string()), RawCell::DateTime),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
    }
}

impl DatasetParser for SpreadsheetDatasetParser {
    fn supports(&self, filename: &str) -> bool {
        extension_of(filename).is_some_and(|ext| EXTENSIONS.contains(&ext.as_str()))
    }

    fn parse(&self, bytes: &[u8], filename: &str) -> Result<Dataset, DomainError> {
        Ok(self.read(bytes, filename)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn supports_spreadsheet_extensions() {
        let parser = SpreadsheetDatasetParser::new();
        assert!(parser.supports("line.xlsx"));
        assert!(parser.supports("LINE.XLS"));
        assert!(parser.supports("line.ods"));
        assert!(!parser.supports("line.csv"));
    }

    #[test]
    fn numeric_cells_become_numbers() {
        assert_eq!(raw_cell(&Data::Int(3)), RawCell::Number(3.0));
        assert_eq!(raw_cell(&Data::Float(2.5)), RawCell::Number(2.5));
        assert_eq!(raw_cell(&Data::String("  ".into())), RawCell::Empty);
    }

    #[test]
    fn garbage_bytes_fail_to_parse() {
        let err = SpreadsheetDatasetParser::new()
            .parse(b"definitely not a workbook", "line.xlsx")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ParseFailed);
    }
}
