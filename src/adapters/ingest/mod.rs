//! Dataset ingest adapters.
//!
//! Each parser claims the file extensions it understands; the upload handler
//! picks the first parser whose `supports` accepts the filename.

mod csv_parser;
mod errors;
mod spreadsheet_parser;
mod table_builder;

pub use csv_parser::CsvDatasetParser;
pub use errors::IngestError;
pub use spreadsheet_parser::SpreadsheetDatasetParser;

use std::sync::Arc;

use crate::ports::DatasetParser;

/// Every parser the upload screen accepts.
pub fn default_parsers() -> Vec<Arc<dyn DatasetParser>> {
    vec![
        Arc::new(CsvDatasetParser::new()),
        Arc::new(SpreadsheetDatasetParser::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_extension_has_exactly_one_parser() {
        let parsers = default_parsers();
        for name in ["a.csv", "a.xlsx", "a.xls", "a.ods"] {
            assert_eq!(parsers.iter().filter(|p| p.supports(name)).count(), 1, "{}", name);
        }
        assert!(!parsers.iter().any(|p| p.supports("a.txt")));
    }
}
