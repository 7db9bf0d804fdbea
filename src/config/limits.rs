//! Dataset capacity limits

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::dataset::CapacityLimits;

/// Caps applied to uploaded datasets and enforced by every analysis screen
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum number of data rows
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,

    /// Maximum number of columns
    #[serde(default = "default_max_columns")]
    pub max_columns: usize,

    /// Rows shown in the upload preview
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl LimitsConfig {
    /// Capacity limits as the domain sees them
    pub fn capacity(&self) -> CapacityLimits {
        CapacityLimits::new(self.max_rows, self.max_columns)
    }

    /// Validate limit values
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_rows == 0 {
            return Err(ValidationError::InvalidLimit("max_rows"));
        }
        if self.max_columns == 0 {
            return Err(ValidationError::InvalidLimit("max_columns"));
        }
        if self.preview_rows == 0 {
            return Err(ValidationError::InvalidLimit("preview_rows"));
        }
        Ok(())
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
            max_columns: default_max_columns(),
            preview_rows: default_preview_rows(),
        }
    }
}

fn default_max_rows() -> usize {
    10_000
}

fn default_max_columns() -> usize {
    20
}

fn default_preview_rows() -> usize {
    10
}
