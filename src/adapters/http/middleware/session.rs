//! Session middleware and extractor for axum.
//!
//! ```text
//! Request → session_middleware → injects ActiveSession into extensions
//!                                      ↓
//!                              Handler → RequireSession extractor reads from extensions
//! ```
//!
//! Requests without the header pass through untouched so that
//! `POST /sessions` can be reached before a session exists.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::registry::SharedSession;
use crate::adapters::http::AppState;
use crate::domain::foundation::SessionId;

/// Header carrying the signed session token.
pub const SESSION_HEADER: &str = "x-lss-session";

/// The session a request was made under.
#[derive(Clone)]
pub struct ActiveSession {
    pub id: SessionId,
    pub context: SharedSession,
}

/// Validates the session token and injects the matching session.
///
/// This middleware:
/// 1. Reads the token from the `x-lss-session` header
/// 2. Verifies its HMAC signature
/// 3. Looks the session up in the registry
/// 4. On success, injects `ActiveSession` into request extensions
/// 5. On a bad token or unknown session, returns 401 Unauthorized
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(SESSION_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    let Some(token) = token else {
        return next.run(request).await;
    };

    let id = match state.signer.verify(&token) {
        Ok(id) => id,
        Err(e) => {
            tracing::debug!(error = %e, "Session token rejected");
            return SessionRejection::InvalidToken.into_response();
        }
    };

    match state.sessions.get(&id) {
        Some(context) => {
            request
                .extensions_mut()
                .insert(ActiveSession { id, context });
            next.run(request).await
        }
        None => {
            tracing::debug!(session_id = %id, "Token for unknown session");
            SessionRejection::UnknownSession.into_response()
        }
    }
}

/// Extractor that requires an open session.
#[derive(Clone)]
pub struct RequireSession(pub ActiveSession);

impl<S> axum::extract::FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<ActiveSession>()
                .cloned()
                .map(RequireSession)
                .ok_or(SessionRejection::MissingSession)
        })
    }
}

/// Rejection type for session failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRejection {
    /// No session header was sent.
    MissingSession,
    /// The token failed verification.
    InvalidToken,
    /// The token is genuine but the session is gone.
    UnknownSession,
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        let message = match self {
            SessionRejection::MissingSession => "Session required",
            SessionRejection::InvalidToken => "Invalid session token",
            SessionRejection::UnknownSession => "Session not found",
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": message,
                "code": "SESSION_ERROR"
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_map_to_401() {
        for rejection in [
            SessionRejection::MissingSession,
            SessionRejection::InvalidToken,
            SessionRejection::UnknownSession,
        ] {
            assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
        }
    }
}
