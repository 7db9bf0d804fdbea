//! Report export adapters (CSV and PDF).

mod csv_exporter;
mod errors;
mod pdf_exporter;

pub use csv_exporter::CsvReportExporter;
pub use errors::ExportError;
pub use pdf_exporter::PdfReportExporter;

use std::sync::Arc;

use crate::domain::report::ExportFormat;
use crate::ports::ReportExporter;

/// One exporter per supported format.
pub fn exporter_for(format: ExportFormat) -> Arc<dyn ReportExporter> {
    match format {
        ExportFormat::Csv => Arc::new(CsvReportExporter::new()),
        ExportFormat::Pdf => Arc::new(PdfReportExporter::new()),
    }
}
