//! LogoutHandler - returns a session to the anonymous menu.

use crate::domain::foundation::ValidationError;
use crate::domain::session::SessionContext;

#[derive(Debug, Default)]
pub struct LogoutHandler;

impl LogoutHandler {
    pub fn new() -> Self {
        Self
    }

    /// Clears the user and every piece of working state the session held.
    pub fn handle(&self, session: &mut SessionContext) -> Result<(), ValidationError> {
        let username = session.username().map(str::to_string);
        session.log_out()?;
        tracing::info!(
            username = username.as_deref().unwrap_or(""),
            session_id = %session.id(),
            "User logged out"
        );
        Ok(())
    }
}
