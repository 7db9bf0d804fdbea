//! UserRepository port - persistence of user accounts.

use thiserror::Error;

use crate::domain::foundation::Timestamp;
use crate::domain::user::{AuthError, RegistrationError, UserRecord};

/// Failures reading or writing the user store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("User file not found: {0}")]
    Missing(String),

    #[error("User file is corrupt: {0}")]
    Corrupt(String),

    #[error("User file I/O failed: {0}")]
    Io(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::store_unavailable(err.to_string())
    }
}

impl From<StoreError> for RegistrationError {
    fn from(err: StoreError) -> Self {
        RegistrationError::StoreUnavailable(err.to_string())
    }
}

/// Result of a uniqueness-checked insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    UsernameTaken,
    EmailTaken,
}

/// Port for the user record store.
///
/// # Contract
///
/// Implementations must:
/// - Treat `username` as the unique key
/// - Check username and email uniqueness in the same critical section as the insert
/// - Report a missing store as `StoreError::Missing` on reads; inserts create it
/// - Never delete records
pub trait UserRepository: Send + Sync {
    /// Looks a user up by exact username.
    fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Appends `record` unless its username or email is already registered.
    fn insert_unique(&self, record: UserRecord) -> Result<InsertOutcome, StoreError>;

    /// Stores `at` as the user's last login.
    fn record_login(&self, username: &str, at: Timestamp) -> Result<(), StoreError>;
}
