//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Account Ports
//!
//! - `UserRepository` - Flat-file user records
//! - `PasswordHasher` - Salted one-way hashing
//!
//! ## Data Ports
//!
//! - `DatasetParser` - Upload format parsers (CSV, spreadsheet)
//! - `ReportExporter` - Report renderers (CSV, PDF)
//!
//! Every port is synchronous: each call completes within a single render.

mod dataset_parser;
mod password_hasher;
mod report_exporter;
mod user_repository;

pub use dataset_parser::{extension_of, DatasetParser};
pub use password_hasher::{HashError, PasswordHasher};
pub use report_exporter::ReportExporter;
pub use user_repository::{InsertOutcome, StoreError, UserRepository};
