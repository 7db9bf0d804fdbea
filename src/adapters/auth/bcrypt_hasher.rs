//! bcrypt implementation of [`PasswordHasher`].

use crate::ports::{HashError, PasswordHasher};

pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// `cost` must lie in bcrypt's 4..=31 range; configuration validates it.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        bcrypt::hash(password, self.cost).map_err(|e| HashError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        bcrypt::verify(password, hash).map_err(|e| HashError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_original_password_only() {
        let hasher = BcryptHasher::new(4);
        let hash = hasher.hash("Secret123").unwrap();
        assert_ne!(hash, "Secret123");
        assert!(hasher.verify("Secret123", &hash).unwrap());
        assert!(!hasher.verify("Secret124", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = BcryptHasher::new(4);
        assert_ne!(hasher.hash("Secret123").unwrap(), hasher.hash("Secret123").unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let hasher = BcryptHasher::new(4);
        assert!(hasher.verify("Secret123", "not-a-hash").is_err());
    }
}
