//! HTTP handlers for session endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::dto::ErrorResponse;
use crate::adapters::http::middleware::RequireSession;
use crate::adapters::http::registry::lock;
use crate::adapters::http::AppState;
use crate::domain::navigation::MenuState;

use super::dto::{MenuResponse, OpenSessionResponse};

/// POST /sessions - Open an anonymous session
pub async fn open_session(State(state): State<AppState>) -> Response {
    let id = match state.sessions.open() {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::unavailable(e.to_string())),
            )
                .into_response();
        }
    };

    match state.signer.sign(id) {
        Ok(token) => {
            let response = OpenSessionResponse {
                session_id: id.to_string(),
                token,
                menu: MenuResponse::new(MenuState::Anonymous, None),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            state.sessions.close(&id);
            tracing::error!(error = %e, "Failed to sign session token");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Could not open a session")),
            )
                .into_response()
        }
    }
}

/// DELETE /sessions - End the caller's session and drop its working state
pub async fn close_session(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
) -> StatusCode {
    state.sessions.close(&session.id);
    StatusCode::NO_CONTENT
}

/// GET /menu - Screens offered to the session
pub async fn get_menu(RequireSession(session): RequireSession) -> Response {
    let response = MenuResponse::from(&*lock(&session.context));
    (StatusCode::OK, Json(response)).into_response()
}
