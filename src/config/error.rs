//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind host: {0}")]
    InvalidHost(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("bcrypt cost must be between 4 and 31, got {0}")]
    InvalidHashCost(u32),

    #[error("Secret key must be changed from the default in production")]
    DefaultSecretInProduction,

    #[error("Secret key must be at least {0} characters")]
    SecretTooShort(usize),

    #[error("Limit '{0}' must be greater than zero")]
    InvalidLimit(&'static str),
}
