//! HTTP middleware for axum.
//!
//! - `session` - Session token middleware and extractor

pub mod session;

pub use session::{session_middleware, ActiveSession, RequireSession, SessionRejection, SESSION_HEADER};
