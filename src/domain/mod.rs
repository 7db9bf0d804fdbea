//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `dataset` - Tabular data model, ingest inference and cleaning
//! - `stats` - Descriptive statistics shared by every analysis
//! - `report` - Tables, chart specifications and export formats
//! - `analysis` - Pure quality-analysis services (Pareto, control charts, DPMO...)
//! - `user` - Account records and registration rules
//! - `navigation` - Menu screens and the login state machine
//! - `session` - Per-session working state

pub mod analysis;
pub mod dataset;
pub mod foundation;
pub mod navigation;
pub mod report;
pub mod session;
pub mod stats;
pub mod user;
