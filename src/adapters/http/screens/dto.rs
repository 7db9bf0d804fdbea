//! HTTP DTOs for screen endpoints.
//!
//! Screen requests and pages travel as the application types themselves
//! (`ScreenRequest` in, `Page` out); only the upload query needs its own shape.

use serde::Deserialize;

/// Query parameters for `POST /upload`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadQuery {
    /// Original file name; its extension selects the parser.
    pub filename: String,
}
