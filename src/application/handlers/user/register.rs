//! RegisterHandler - Command handler for creating user accounts.

use std::sync::Arc;

use crate::domain::user::{RegistrationError, RegistrationForm, UserRecord};
use crate::ports::{InsertOutcome, PasswordHasher, UserRepository};

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Handler for registrations.
pub struct RegisterHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RegisterHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub fn handle(&self, cmd: RegisterCommand) -> Result<UserRecord, RegistrationError> {
        // 1. Validate the form
        let form = RegistrationForm {
            username: cmd.username.trim().to_string(),
            email: cmd.email.trim().to_string(),
            password: cmd.password,
            confirm_password: cmd.confirm_password,
        };
        form.validate().map_err(RegistrationError::Invalid)?;

        // 2. Hash and insert under the store's uniqueness check
        let hash = self
            .hasher
            .hash(&form.password)
            .map_err(|e| RegistrationError::Hashing(e.to_string()))?;
        let record = UserRecord::new(form.username, form.email, hash);

        match self.users.insert_unique(record.clone()) {
            Ok(InsertOutcome::Inserted) => {
                tracing::info!(username = %record.username, "User registered");
                Ok(record)
            }
            Ok(InsertOutcome::UsernameTaken) => Err(RegistrationError::UsernameTaken),
            Ok(InsertOutcome::EmailTaken) => Err(RegistrationError::EmailTaken),
            Err(e) => {
                tracing::warn!(error = %e, "Registration failed: user store unavailable");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::user_store::InMemoryUserStore;
    use crate::application::handlers::test_support::PlainHasher;
    use crate::domain::user::RegistrationIssue;

    fn handler() -> (RegisterHandler, Arc<InMemoryUserStore>) {
        let store = Arc::new(InMemoryUserStore::new());
        (RegisterHandler::new(store.clone(), Arc::new(PlainHasher)), store)
    }

    fn cmd(username: &str, email: &str) -> RegisterCommand {
        RegisterCommand {
            username: username.to_string(),
            email: email.to_string(),
            password: "Secret123".to_string(),
            confirm_password: "Secret123".to_string(),
        }
    }

    #[test]
    fn registration_stores_hashed_password() {
        let (handler, store) = handler();
        let record = handler.handle(cmd(" ana01 ", "ana@example.com")).unwrap();

        assert_eq!(record.username, "ana01");
        assert_eq!(record.password_hash, "plain:Secret123");
        assert!(store.find_by_username("ana01").unwrap().is_some());
    }

    #[test]
    fn duplicate_username_is_refused() {
        let (handler, _) = handler();
        handler.handle(cmd("ana01", "ana@example.com")).unwrap();
        let err = handler.handle(cmd("ana01", "other@example.com")).unwrap_err();
        assert_eq!(err, RegistrationError::UsernameTaken);
    }

    #[test]
    fn duplicate_email_is_refused() {
        let (handler, _) = handler();
        handler.handle(cmd("ana01", "ana@example.com")).unwrap();
        let err = handler.handle(cmd("bob01", "ana@example.com")).unwrap_err();
        assert_eq!(err, RegistrationError::EmailTaken);
    }

    #[test]
    fn invalid_form_is_not_stored() {
        let (handler, store) = handler();
        let mut command = cmd("ana01", "ana@example.com");
        command.confirm_password = "Secret124".to_string();

        let err = handler.handle(command).unwrap_err();

        assert_eq!(
            err,
            RegistrationError::Invalid(vec![RegistrationIssue::PasswordMismatch])
        );
        assert!(store.find_by_username("ana01").unwrap().is_none());
    }
}
