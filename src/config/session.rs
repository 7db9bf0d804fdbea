//! Session lifetime limits

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// How long idle sessions live and how many may be open at once
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Idle time after which a session and its dataset are discarded
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Open sessions allowed before `POST /sessions` is refused
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Interval between idle-session sweeps
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs((self.idle_timeout_secs / 4).max(1))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.idle_timeout_secs == 0 {
            return Err(ValidationError::InvalidLimit("idle_timeout_secs"));
        }
        if self.max_sessions == 0 {
            return Err(ValidationError::InvalidLimit("max_sessions"));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_idle_timeout() -> u64 {
    30 * 60
}

fn default_max_sessions() -> usize {
    1_000
}
