//! LSS Analytics - Lean Six Sigma Analysis Toolkit
//!
//! Analysts upload a tabular dataset and run a fixed menu of quality tools
//! against it: Pareto, histogram, control chart, scatter, stratification,
//! Ishikawa, checklist sheets, a KPI dashboard and a DPMO calculator.
//! Access is gated by accounts kept in a CSV user file.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
