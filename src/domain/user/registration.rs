//! Registration input rules.

use once_cell::sync::Lazy;
use regex::Regex;

use super::errors::RegistrationIssue;

pub const MIN_USERNAME_LEN: usize = 4;
pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok());

/// Sign-up form as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Checks every rule and reports all failures.
    ///
    /// A confirmation mismatch is reported alone since the other password
    /// rules are meaningless until both entries agree.
    pub fn validate(&self) -> Result<(), Vec<RegistrationIssue>> {
        if self.password != self.confirm_password {
            return Err(vec![RegistrationIssue::PasswordMismatch]);
        }

        let mut issues = Vec::new();
        let username = self.username.trim();
        if username.chars().count() < MIN_USERNAME_LEN {
            issues.push(RegistrationIssue::UsernameTooShort);
        }
        if !username.chars().all(char::is_alphanumeric) {
            issues.push(RegistrationIssue::UsernameNotAlphanumeric);
        }
        if !is_valid_email(&self.email) {
            issues.push(RegistrationIssue::InvalidEmail);
        }
        issues.extend(password_issues(&self.password));

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|re| re.is_match(email.trim()))
}

pub fn password_issues(password: &str) -> Vec<RegistrationIssue> {
    let mut issues = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        issues.push(RegistrationIssue::PasswordTooShort);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        issues.push(RegistrationIssue::PasswordMissingDigit);
    }
    if !password.chars().any(char::is_uppercase) {
        issues.push(RegistrationIssue::PasswordMissingUppercase);
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, email: &str, password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(form("ana01", "ana@example.com", "Secret123", "Secret123").validate().is_ok());
    }

    #[test]
    fn short_username_is_rejected() {
        let issues = form("ana", "ana@example.com", "Secret123", "Secret123").validate().unwrap_err();
        assert_eq!(issues, vec![RegistrationIssue::UsernameTooShort]);
    }

    #[test]
    fn non_alphanumeric_username_is_rejected() {
        let issues = form("ana_01", "ana@example.com", "Secret123", "Secret123").validate().unwrap_err();
        assert_eq!(issues, vec![RegistrationIssue::UsernameNotAlphanumeric]);
    }

    #[test]
    fn bad_email_is_rejected() {
        for email in ["ana", "ana@example", "ana@@example.com", "ana@example.c"] {
            let issues = form("ana01", email, "Secret123", "Secret123").validate().unwrap_err();
            assert_eq!(issues, vec![RegistrationIssue::InvalidEmail], "{}", email);
        }
    }

    #[test]
    fn password_rules_are_each_reported() {
        assert_eq!(
            form("ana01", "ana@example.com", "Sh0rt", "Sh0rt").validate().unwrap_err(),
            vec![RegistrationIssue::PasswordTooShort]
        );
        assert_eq!(
            form("ana01", "ana@example.com", "NoDigitsHere", "NoDigitsHere").validate().unwrap_err(),
            vec![RegistrationIssue::PasswordMissingDigit]
        );
        assert_eq!(
            form("ana01", "ana@example.com", "lowercase1", "lowercase1").validate().unwrap_err(),
            vec![RegistrationIssue::PasswordMissingUppercase]
        );
    }

    #[test]
    fn mismatched_confirmation_is_reported_alone() {
        let issues = form("a", "bad", "Secret123", "Secret124").validate().unwrap_err();
        assert_eq!(issues, vec![RegistrationIssue::PasswordMismatch]);
    }

    #[test]
    fn multiple_failures_are_collected() {
        let issues = form("a!", "bad", "short", "short").validate().unwrap_err();
        assert!(issues.contains(&RegistrationIssue::UsernameTooShort));
        assert!(issues.contains(&RegistrationIssue::UsernameNotAlphanumeric));
        assert!(issues.contains(&RegistrationIssue::InvalidEmail));
        assert!(issues.contains(&RegistrationIssue::PasswordTooShort));
    }
}
