//! Export rendering errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Report '{0}' has no table to export")]
    NothingToExport(String),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV export failed: {0}")]
    Buffer(String),

    #[error("PDF export failed: {0}")]
    Pdf(String),
}

impl From<ExportError> for DomainError {
    fn from(err: ExportError) -> Self {
        let code = match err {
            ExportError::NothingToExport(_) => ErrorCode::ValidationFailed,
            _ => ErrorCode::InternalError,
        };
        DomainError::new(code, err.to_string())
    }
}
