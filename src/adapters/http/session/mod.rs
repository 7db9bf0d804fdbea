//! HTTP adapter for opening sessions and reading the menu.

mod dto;
mod handlers;
mod routes;

pub use dto::{MenuEntry, MenuResponse, OpenSessionResponse};
pub use handlers::{get_menu, open_session};
pub use routes::session_routes;
