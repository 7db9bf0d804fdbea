//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `LSS_ANALYTICS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use lss_analytics::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Users stored in {}", config.storage.users_file.display());
//! ```

mod auth;
mod error;
mod limits;
mod server;
mod session;
mod storage;

pub use auth::{AuthConfig, DEFAULT_SECRET_KEY};
pub use error::{ConfigError, ValidationError};
pub use limits::LimitsConfig;
pub use server::{Environment, ServerConfig};
pub use session::SessionConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// development configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Session signing and password hashing
    #[serde(default)]
    pub auth: AuthConfig,

    /// Flat-file locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Dataset capacity limits
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Idle expiry and the open-session cap
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LSS_ANALYTICS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `LSS_ANALYTICS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `LSS_ANALYTICS__STORAGE__USERS_FILE=...` -> `storage.users_file = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LSS_ANALYTICS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.storage.validate()?;
        self.limits.validate()?;
        self.session.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
