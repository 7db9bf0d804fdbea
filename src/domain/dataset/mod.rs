//! Dataset module - the uploaded table every analysis reads.
//!
//! A [`Dataset`] is built once per upload from [`RawCell`]s, types are
//! inferred per column, and it is replaced wholesale by the next upload.
//! Cleaning and conversion always produce a new dataset.

mod cleaning;
mod column;
mod table;

pub use cleaning::{Conversion, MissingEntry, Remediation};
pub use column::{parse_date, parse_number, CellValue, Column, ColumnKind, RawCell};
pub use table::{CapacityLimits, ColumnSummary, Dataset, DatasetError, DatasetInfo};
