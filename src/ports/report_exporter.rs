//! ReportExporter port - renders a [`Report`] into a downloadable file.

use crate::domain::foundation::DomainError;
use crate::domain::report::{ExportFormat, Report};

/// Port for one export format.
///
/// Output only has to be a valid file of its format; there is no byte-exact
/// contract.
pub trait ReportExporter: Send + Sync {
    fn format(&self) -> ExportFormat;

    fn render(&self, report: &Report) -> Result<Vec<u8>, DomainError>;
}
