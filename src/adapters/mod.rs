//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - bcrypt password hashing and signed session tokens
//! - `export` - CSV and PDF report rendering
//! - `http` - axum JSON API over the screen router
//! - `ingest` - CSV and spreadsheet dataset parsers
//! - `user_store` - CSV file and in-memory user repositories

pub mod auth;
pub mod export;
pub mod http;
pub mod ingest;
pub mod user_store;

pub use auth::{BcryptHasher, SessionTokenSigner};
pub use export::{exporter_for, CsvReportExporter, PdfReportExporter};
pub use http::{app_router, AppState, SessionRegistry};
pub use ingest::{default_parsers, CsvDatasetParser, SpreadsheetDatasetParser};
pub use user_store::{CsvUserStore, InMemoryUserStore};
