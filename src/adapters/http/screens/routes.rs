//! HTTP routes for screen endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{download, render_screen, upload_dataset};

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Creates the screen router.
pub fn screen_routes() -> Router<AppState> {
    Router::new()
        .route("/screens", post(render_screen))
        .route(
            "/upload",
            post(upload_dataset).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/downloads/:filename", get(download))
}
