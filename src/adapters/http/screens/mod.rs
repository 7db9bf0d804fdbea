//! HTTP adapter for screen rendering, uploads and downloads.

mod dto;
mod handlers;
mod routes;

pub use dto::UploadQuery;
pub use handlers::{download, render_screen, upload_dataset};
pub use routes::{screen_routes, MAX_UPLOAD_BYTES};
