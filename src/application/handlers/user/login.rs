//! LoginHandler - Command handler for logging a session in.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::session::SessionContext;
use crate::domain::user::AuthError;
use crate::ports::{PasswordHasher, UserRepository};

/// Command to log in with a username and password.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    pub username: String,
    pub previous_login: Option<Timestamp>,
}

/// Handler for logging in.
pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl LoginHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub fn handle(
        &self,
        session: &mut SessionContext,
        cmd: LoginCommand,
    ) -> Result<LoginResult, AuthError> {
        let username = cmd.username.trim();
        if username.is_empty() || cmd.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if session.is_authenticated() {
            return Err(AuthError::AlreadyLoggedIn);
        }

        // 1. Look the user up
        let record = match self.users.find_by_username(username) {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::warn!(username, "Login rejected: unknown user");
                return Err(AuthError::UserNotFound);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed: user store unavailable");
                return Err(e.into());
            }
        };

        // 2. Check the password
        let matches = self.hasher.verify(&cmd.password, &record.password_hash).map_err(|e| {
            tracing::warn!(username, error = %e, "Stored password hash is unreadable");
            AuthError::store_unavailable(e.to_string())
        })?;
        if !matches {
            tracing::warn!(username, "Login rejected: bad password");
            return Err(AuthError::BadPassword);
        }

        // 3. Record the login, then switch the session's menu
        self.users.record_login(username, Timestamp::now())?;
        session
            .log_in(username)
            .map_err(|_| AuthError::AlreadyLoggedIn)?;

        tracing::info!(username, session_id = %session.id(), "User logged in");
        Ok(LoginResult {
            username: username.to_string(),
            previous_login: record.last_login,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::user_store::InMemoryUserStore;
    use crate::domain::foundation::SessionId;
    use crate::domain::user::UserRecord;
    use crate::application::handlers::test_support::PlainHasher;
    use crate::ports::{InsertOutcome, StoreError};

    struct BrokenStore;

    impl UserRepository for BrokenStore {
        fn find_by_username(&self, _: &str) -> Result<Option<UserRecord>, StoreError> {
            Err(StoreError::Missing("users.csv".to_string()))
        }

        fn insert_unique(&self, _: UserRecord) -> Result<InsertOutcome, StoreError> {
            Err(StoreError::Missing("users.csv".to_string()))
        }

        fn record_login(&self, _: &str, _: Timestamp) -> Result<(), StoreError> {
            Err(StoreError::Missing("users.csv".to_string()))
        }
    }

    fn handler_with_user() -> (LoginHandler, Arc<InMemoryUserStore>) {
        let store = Arc::new(InMemoryUserStore::new());
        store
            .insert_unique(UserRecord::new("ana01", "ana@example.com", "plain:Secret123"))
            .unwrap();
        (LoginHandler::new(store.clone(), Arc::new(PlainHasher)), store)
    }

    fn cmd(username: &str, password: &str) -> LoginCommand {
        LoginCommand {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn successful_login_authenticates_session_and_records_time() {
        let (handler, store) = handler_with_user();
        let mut session = SessionContext::new(SessionId::new());

        let result = handler.handle(&mut session, cmd("ana01", "Secret123")).unwrap();

        assert_eq!(result.username, "ana01");
        assert!(result.previous_login.is_none());
        assert_eq!(session.username(), Some("ana01"));
        let stored = store.find_by_username("ana01").unwrap().unwrap();
        assert!(stored.last_login.is_some());
    }

    #[test]
    fn unknown_user_is_reported() {
        let (handler, _) = handler_with_user();
        let mut session = SessionContext::new(SessionId::new());
        let err = handler.handle(&mut session, cmd("bob01", "Secret123")).unwrap_err();
        assert_eq!(err, AuthError::UserNotFound);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn wrong_password_is_reported() {
        let (handler, _) = handler_with_user();
        let mut session = SessionContext::new(SessionId::new());
        let err = handler.handle(&mut session, cmd("ana01", "Wrong123")).unwrap_err();
        assert_eq!(err, AuthError::BadPassword);
    }

    #[test]
    fn blank_credentials_are_rejected() {
        let (handler, _) = handler_with_user();
        let mut session = SessionContext::new(SessionId::new());
        let err = handler.handle(&mut session, cmd("  ", "")).unwrap_err();
        assert_eq!(err, AuthError::MissingCredentials);
    }

    #[test]
    fn missing_store_is_unavailable() {
        let handler = LoginHandler::new(Arc::new(BrokenStore), Arc::new(PlainHasher));
        let mut session = SessionContext::new(SessionId::new());
        let err = handler.handle(&mut session, cmd("ana01", "Secret123")).unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
    }
}
