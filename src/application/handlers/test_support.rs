//! Test doubles shared by handler and screen tests.

use crate::ports::{HashError, PasswordHasher};

/// Reversible stand-in for bcrypt so tests stay fast.
pub(crate) struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        Ok(format!("plain:{}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        hash.strip_prefix("plain:")
            .map(|stored| stored == password)
            .ok_or_else(|| HashError("not a plain hash".to_string()))
    }
}
