//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Secret used when none is configured. Rejected in production.
pub const DEFAULT_SECRET_KEY: &str = "default_secret_key";

/// Minimum secret length accepted in production.
const MIN_SECRET_LENGTH: usize = 16;

/// Authentication configuration (session signing and password hashing)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Key used to sign session tokens
    #[serde(default = "default_secret_key")]
    pub secret_key: SecretString,

    /// bcrypt work factor for new password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production the secret key must be changed from the default
    /// and be reasonably long.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ValidationError::InvalidHashCost(self.bcrypt_cost));
        }

        let secret = self.secret_key.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SECRET_KEY"));
        }

        if *environment == Environment::Production {
            if secret == DEFAULT_SECRET_KEY {
                return Err(ValidationError::DefaultSecretInProduction);
            }
            if secret.len() < MIN_SECRET_LENGTH {
                return Err(ValidationError::SecretTooShort(MIN_SECRET_LENGTH));
            }
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn default_secret_key() -> SecretString {
    SecretString::new(DEFAULT_SECRET_KEY.to_string())
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}
