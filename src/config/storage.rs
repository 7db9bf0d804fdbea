//! Flat-file storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Locations of the flat files the application reads and writes
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// CSV file holding user records
    #[serde(default = "default_users_file")]
    pub users_file: PathBuf,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.users_file.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__USERS_FILE"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            users_file: default_users_file(),
        }
    }
}

fn default_users_file() -> PathBuf {
    PathBuf::from("data/users.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.users_file, PathBuf::from("data/users.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_users_file_rejected() {
        let config = StorageConfig {
            users_file: PathBuf::new(),
        };
        assert!(config.validate().is_err());
    }
}
