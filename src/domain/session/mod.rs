//! Session module - explicit per-analyst state.
//!
//! Each browser session owns one [`SessionContext`]; handlers receive it by
//! reference instead of reaching for process-wide state.

mod context;

pub use context::{Download, SessionContext};
