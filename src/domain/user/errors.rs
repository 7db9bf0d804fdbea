//! Account errors for login and registration.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// A single failed registration rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationIssue {
    #[error("Username must be at least 4 characters long")]
    UsernameTooShort,

    #[error("Username must contain only letters and numbers")]
    UsernameNotAlphanumeric,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,

    #[error("Password must contain at least one number")]
    PasswordMissingDigit,

    #[error("Password must contain at least one uppercase letter")]
    PasswordMissingUppercase,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Login failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Incorrect password")]
    BadPassword,

    #[error("Already logged in")]
    AlreadyLoggedIn,

    #[error("User store unavailable: {0}")]
    StoreUnavailable(String),
}

impl AuthError {
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable(message.into())
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        let code = match &err {
            AuthError::MissingCredentials => ErrorCode::ValidationFailed,
            AuthError::UserNotFound => ErrorCode::UserNotFound,
            AuthError::BadPassword => ErrorCode::BadPassword,
            AuthError::AlreadyLoggedIn => ErrorCode::InvalidStateTransition,
            AuthError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email is already registered")]
    EmailTaken,

    #[error("{}", join_issues(.0))]
    Invalid(Vec<RegistrationIssue>),

    #[error("Could not secure the password: {0}")]
    Hashing(String),

    #[error("User store unavailable: {0}")]
    StoreUnavailable(String),
}

fn join_issues(issues: &[RegistrationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<RegistrationError> for DomainError {
    fn from(err: RegistrationError) -> Self {
        let code = match &err {
            RegistrationError::UsernameTaken => ErrorCode::UsernameTaken,
            RegistrationError::EmailTaken => ErrorCode::EmailTaken,
            RegistrationError::Invalid(_) => ErrorCode::ValidationFailed,
            RegistrationError::Hashing(_) => ErrorCode::InternalError,
            RegistrationError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
        };
        DomainError::new(code, err.to_string())
    }
}
