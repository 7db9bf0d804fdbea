//! PasswordHasher port - salted one-way password hashing.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Password hashing failed: {0}")]
pub struct HashError(pub String);

pub trait PasswordHasher: Send + Sync {
    /// Produces a salted hash suitable for storage.
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// Checks `password` against a stored hash. A malformed hash is an error,
    /// a mismatch is `Ok(false)`.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}
