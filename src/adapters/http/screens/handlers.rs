//! HTTP handlers for screen endpoints.
//!
//! Rendering runs on the blocking pool: password hashing and PDF export are
//! CPU-bound and would otherwise stall the runtime.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::task::JoinError;

use crate::adapters::http::dto::ErrorResponse;
use crate::adapters::http::middleware::RequireSession;
use crate::adapters::http::registry::lock;
use crate::adapters::http::AppState;
use crate::application::handlers::UploadCommand;
use crate::application::screens::{Page, ScreenRequest};

use super::dto::UploadQuery;

/// POST /screens - Render one screen for the session
pub async fn render_screen(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
    Json(request): Json<ScreenRequest>,
) -> Response {
    let router = state.router.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut context = lock(&session.context);
        router.render(&mut context, request)
    })
    .await;

    page_response(result)
}

/// POST /upload?filename= - Load a dataset from the raw request body
pub async fn upload_dataset(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Response {
    if query.filename.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("filename is required")),
        )
            .into_response();
    }

    let cmd = UploadCommand {
        filename: query.filename,
        bytes: body.to_vec(),
    };
    let router = state.router.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut context = lock(&session.context);
        router.upload(&mut context, cmd)
    })
    .await;

    page_response(result)
}

/// GET /downloads/:filename - Fetch an export produced by an earlier render
pub async fn download(
    RequireSession(session): RequireSession,
    Path(filename): Path<String>,
) -> Response {
    let found = lock(&session.context).download(&filename).cloned();

    match found {
        Some(file) => {
            let disposition = format!("attachment; filename=\"{}\"", file.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, file.content_type().to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                file.bytes,
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Download", &filename)),
        )
            .into_response(),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn page_response(result: Result<Page, JoinError>) -> Response {
    match result {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Screen render task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Screen could not be rendered")),
            )
                .into_response()
        }
    }
}
