//! Error type shared by the analysis services.

use thiserror::Error;

use crate::domain::dataset::{CapacityLimits, Dataset, DatasetError};
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("No dataset loaded. Please upload a file first")]
    DataAbsent,

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("{0}")]
    Computation(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AnalysisError {
    pub fn computation(message: impl Into<String>) -> Self {
        AnalysisError::Computation(message.into())
    }
}

impl From<AnalysisError> for DomainError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::DataAbsent => DomainError::new(ErrorCode::DataAbsent, err.to_string()),
            AnalysisError::Dataset(ref inner) if inner.is_capacity() => {
                DomainError::new(ErrorCode::CapacityExceeded, err.to_string())
            }
            AnalysisError::Dataset(
                DatasetError::ColumnNotFound(ref column)
                | DatasetError::WrongColumnKind { ref column, .. },
            ) => DomainError::new(ErrorCode::ComputationFailed, err.to_string())
                .with_detail("column", column.clone()),
            AnalysisError::Dataset(_) => {
                DomainError::new(ErrorCode::ValidationFailed, err.to_string())
            }
            AnalysisError::Computation(_) => {
                DomainError::new(ErrorCode::ComputationFailed, err.to_string())
            }
            AnalysisError::Validation(inner) => inner.into(),
        }
    }
}

/// Fetches the active dataset and enforces the capacity caps.
pub fn require_dataset<'a>(
    dataset: Option<&'a Dataset>,
    limits: &CapacityLimits,
) -> Result<&'a Dataset, AnalysisError> {
    let dataset = dataset.ok_or(AnalysisError::DataAbsent)?;
    limits.check(dataset)?;
    Ok(dataset)
}
