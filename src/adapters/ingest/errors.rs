//! Upload parsing errors.

use thiserror::Error;

use crate::domain::dataset::DatasetError;
use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("The file is empty")]
    Empty,

    #[error("Could not read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line} has {found} fields, expected at most {expected}")]
    TooManyFields {
        line: u64,
        found: usize,
        expected: usize,
    },

    #[error("Could not read spreadsheet: {0}")]
    Spreadsheet(String),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

impl From<IngestError> for DomainError {
    fn from(err: IngestError) -> Self {
        DomainError::new(ErrorCode::ParseFailed, err.to_string())
    }
}
