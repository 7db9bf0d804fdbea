//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{close_session, get_menu, open_session};

/// Creates the session router.
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(open_session).delete(close_session))
        .route("/menu", get(get_menu))
}
