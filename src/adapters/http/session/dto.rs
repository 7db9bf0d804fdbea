//! HTTP DTOs for session endpoints.

use serde::Serialize;

use crate::domain::navigation::{MenuState, Screen};
use crate::domain::session::SessionContext;

/// Response for `POST /sessions`.
#[derive(Debug, Clone, Serialize)]
pub struct OpenSessionResponse {
    pub session_id: String,
    /// Value for the `x-lss-session` header on every later request.
    pub token: String,
    pub menu: MenuResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuEntry {
    pub screen: Screen,
    pub title: String,
}

/// The menu offered to a session in its current state.
#[derive(Debug, Clone, Serialize)]
pub struct MenuResponse {
    pub state: MenuState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub screens: Vec<MenuEntry>,
}

impl MenuResponse {
    pub fn new(state: MenuState, username: Option<&str>) -> Self {
        Self {
            state,
            username: username.map(str::to_owned),
            screens: state
                .screens()
                .iter()
                .map(|screen| MenuEntry {
                    screen: *screen,
                    title: screen.title().to_string(),
                })
                .collect(),
        }
    }
}

impl From<&SessionContext> for MenuResponse {
    fn from(session: &SessionContext) -> Self {
        Self::new(session.menu(), session.username())
    }
}
