//! Stored user account.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// One row of the user file. `username` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub last_login: Option<Timestamp>,
}

impl UserRecord {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Timestamp::now(),
            last_login: None,
        }
    }

    pub fn record_login(&mut self, at: Timestamp) {
        self.last_login = Some(at);
    }

    /// Case-insensitive email comparison.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_has_never_logged_in() {
        let record = UserRecord::new("ana01", "ana@example.com", "$2b$hash");
        assert!(record.last_login.is_none());
    }

    #[test]
    fn record_login_sets_timestamp() {
        let mut record = UserRecord::new("ana01", "ana@example.com", "$2b$hash");
        let at = Timestamp::now();
        record.record_login(at);
        assert_eq!(record.last_login, Some(at));
    }

    #[test]
    fn email_match_ignores_case() {
        let record = UserRecord::new("ana01", "Ana@Example.com", "$2b$hash");
        assert!(record.has_email("ana@example.com "));
    }
}
