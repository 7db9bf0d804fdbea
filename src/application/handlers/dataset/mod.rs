//! Dataset command handlers.

mod upload;

pub use upload::{UploadCommand, UploadHandler};
