//! User module - accounts gating access to the analysis tools.
//!
//! # Domain Invariants
//!
//! 1. `username` is unique across the user file
//! 2. Email addresses are unique (case-insensitive)
//! 3. Records are never deleted; only `last_login` changes after creation
//! 4. Passwords are stored only as salted one-way hashes

mod errors;
mod record;
mod registration;

pub use errors::{AuthError, RegistrationError, RegistrationIssue};
pub use record::UserRecord;
pub use registration::{
    is_valid_email, password_issues, RegistrationForm, MIN_PASSWORD_LEN, MIN_USERNAME_LEN,
};
