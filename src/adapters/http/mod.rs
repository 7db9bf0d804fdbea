//! HTTP adapter - JSON API over the screen router.
//!
//! Endpoints:
//! - `POST /sessions` - open a session, returns the signed token
//! - `DELETE /sessions` - end the session
//! - `GET /menu` - screens offered in the current menu state
//! - `POST /screens` - render a `ScreenRequest` into a `Page`
//! - `POST /upload?filename=` - raw file bytes in, Upload page out
//! - `GET /downloads/:filename` - fetch a rendered export
//!
//! Every endpoint except `POST /sessions` needs the `x-lss-session` header.

pub mod dto;
pub mod middleware;
pub mod registry;
pub mod screens;
pub mod session;

use std::sync::Arc;

use axum::Router;

use crate::adapters::auth::SessionTokenSigner;
use crate::application::screens::ScreenRouter;

pub use middleware::SESSION_HEADER;
pub use registry::SessionRegistry;

/// Shared state for every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ScreenRouter>,
    pub sessions: Arc<SessionRegistry>,
    pub signer: Arc<SessionTokenSigner>,
}

impl AppState {
    pub fn new(
        router: ScreenRouter,
        sessions: SessionRegistry,
        signer: SessionTokenSigner,
    ) -> Self {
        Self {
            router: Arc::new(router),
            sessions: Arc::new(sessions),
            signer: Arc::new(signer),
        }
    }
}

/// Assembles every route behind the session middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(session::session_routes())
        .merge(screens::screen_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session_middleware,
        ))
        .with_state(state)
}
