//! In-memory registry of open sessions.
//!
//! Each session sits behind its own mutex, so requests for different
//! sessions never contend and requests for one session are serialized.
//! Sessions idle for longer than the timeout are dropped along with their
//! dataset and exports, either lazily on lookup or by [`SessionRegistry::sweep`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::session::SessionContext;

pub type SharedSession = Arc<Mutex<SessionContext>>;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Session limit of {0} reached")]
    Full(usize),
}

struct Entry {
    context: SharedSession,
    last_seen: Instant,
}

impl Entry {
    fn is_idle(&self, now: Instant, timeout: Duration) -> bool {
        now.duration_since(self.last_seen) >= timeout
    }
}

pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Entry>>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionRegistry {
    pub fn new(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
            max_sessions,
        }
    }

    /// Opens a fresh anonymous session.
    ///
    /// # Errors
    ///
    /// Returns `Full` when `max_sessions` are still live after dropping idle ones.
    pub fn open(&self) -> Result<SessionId, RegistryError> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        if sessions.len() >= self.max_sessions {
            let now = Instant::now();
            sessions.retain(|_, entry| !entry.is_idle(now, self.idle_timeout));
            if sessions.len() >= self.max_sessions {
                tracing::warn!(limit = self.max_sessions, "Session limit reached");
                return Err(RegistryError::Full(self.max_sessions));
            }
        }

        let id = SessionId::new();
        sessions.insert(
            id,
            Entry {
                context: Arc::new(Mutex::new(SessionContext::new(id))),
                last_seen: Instant::now(),
            },
        );
        tracing::info!(session_id = %id, "Session opened");
        Ok(id)
    }

    /// Looks a session up and marks it as active. Idle sessions are dropped.
    pub fn get(&self, id: &SessionId) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        if sessions.get(id)?.is_idle(now, self.idle_timeout) {
            sessions.remove(id);
            tracing::info!(session_id = %id, "Session expired");
            return None;
        }
        let entry = sessions.get_mut(id)?;
        entry.last_seen = now;
        Some(entry.context.clone())
    }

    /// Ends a session. Returns `false` if it was not open.
    pub fn close(&self, id: &SessionId) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some();
        if removed {
            tracing::info!(session_id = %id, "Session closed");
        }
        removed
    }

    /// Drops every idle session, returning how many were removed.
    pub fn sweep(&self) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        let now = Instant::now();
        sessions.retain(|_, entry| !entry.is_idle(now, self.idle_timeout));
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = sessions.len(), "Idle sessions swept");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Locks a session. A panic mid-render leaves the context usable.
pub fn lock(session: &Mutex<SessionContext>) -> MutexGuard<'_, SessionContext> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}
