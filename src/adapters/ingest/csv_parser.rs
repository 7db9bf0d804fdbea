//! CSV upload parser.

use crate::domain::dataset::{Dataset, RawCell};
use crate::domain::foundation::DomainError;
use crate::ports::{extension_of, DatasetParser};

use super::table_builder::build_dataset;
use super::IngestError;

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvDatasetParser;

impl CsvDatasetParser {
    pub fn new() -> Self {
        Self
    }

    fn read(&self, bytes: &[u8], filename: &str) -> Result<Dataset, IngestError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(IngestError::Empty);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == 0 {
                    h.trim_start_matches(BYTE_ORDER_MARK).to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(IngestError::TooManyFields {
                    line: record.position().map_or(0, |p| p.line()),
                    found: record.len(),
                    expected: headers.len(),
                });
            }
            rows.push(
                record
                    .iter()
                    .map(|field| {
                        if field.is_empty() {
                            RawCell::Empty
                        } else {
                            RawCell::Text(field.to_string())
                        }
                    })
                    .collect::<Vec<_>>(),
            );
        }

        build_dataset(filename, headers, rows)
    }
}

impl DatasetParser for CsvDatasetParser {
    fn supports(&self, filename: &str) -> bool {
        extension_of(filename).as_deref() == Some("csv")
    }

    fn parse(&self, bytes: &[u8], filename: &str) -> Result<Dataset, DomainError> {
        Ok(self.read(bytes, filename)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::{CellValue, ColumnKind};
    use crate::domain::foundation::ErrorCode;

    fn parse(text: &str) -> Result<Dataset, DomainError> {
        CsvDatasetParser::new().parse(text.as_bytes(), "line.csv")
    }

    #[test]
    fn parses_headers_and_infers_kinds() {
        let dataset = parse("date,machine,width\n2024-01-02,M1,10.5\n2024-01-03,M2,11\n").unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.column_names(), vec!["date", "machine", "width"]);
        assert_eq!(dataset.column("date").unwrap().kind, ColumnKind::Date);
        assert_eq!(dataset.column("machine").unwrap().kind, ColumnKind::Categorical);
        assert_eq!(dataset.column("width").unwrap().kind, ColumnKind::Numeric);
    }

    #[test]
    fn blank_fields_become_missing() {
        let dataset = parse("a,b\n1,x\n,y\n").unwrap();
        assert_eq!(dataset.column("a").unwrap().values[1], CellValue::Missing);
    }

    #[test]
    fn byte_order_mark_is_stripped() {
        let dataset = parse("\u{feff}defect,count\nScratch,3\n").unwrap();
        assert!(dataset.column("defect").is_ok());
    }

    #[test]
    fn empty_file_fails_to_parse() {
        let err = parse("  \n").unwrap_err();
        assert_eq!(err.code, ErrorCode::ParseFailed);
    }

    #[test]
    fn short_rows_are_padded_with_missing() {
        let dataset = parse("a,b\n1,2\n3\n").unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.column("a").unwrap().kind, ColumnKind::Numeric);
        assert_eq!(dataset.column("b").unwrap().values[1], CellValue::Missing);
    }

    #[test]
    fn long_rows_fail_to_parse() {
        let err = parse("a,b\n1,2\n1,2,3\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::ParseFailed);
        assert_eq!(err.message, "Line 3 has 3 fields, expected at most 2");
    }

    #[test]
    fn duplicate_headers_fail_to_parse() {
        let err = parse("a,a\n1,2\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::ParseFailed);
    }

    #[test]
    fn supports_only_csv_extension() {
        let parser = CsvDatasetParser::new();
        assert!(parser.supports("data.CSV"));
        assert!(!parser.supports("data.xlsx"));
    }
}
