//! Analysis Module - Pure quality-analysis services.
//!
//! Each analyzer takes the active [`Dataset`](crate::domain::dataset::Dataset)
//! (or session-held input) and returns a typed result that can render itself
//! into a [`Report`](crate::domain::report::Report).
//!
//! # Components
//!
//! - `ParetoAnalyzer` - Ranked categories with cumulative percentage
//! - `HistogramAnalyzer` - Sturges frequency distribution plus summary
//! - `ControlChartAnalyzer` - X-bar chart with three-sigma limits
//! - `ScatterAnalyzer` - Pearson correlation between two numeric columns
//! - `StratificationAnalyzer` - Per-group statistics
//! - `DpmoCalculator` - DPMO, yield and sigma level
//! - `CausesGraph` - Ishikawa cause tree
//! - `ChecklistSheet` - Typed data-collection sheet
//! - `DashboardBuilder` - KPI dashboard
//!
//! Nothing here performs I/O or caches results; every call recomputes from
//! its input.

mod checklist;
mod control_chart;
mod dashboard;
mod dpmo;
mod errors;
mod histogram;
mod ishikawa;
mod pareto;
mod scatter;
mod stratification;

pub use checklist::{ChecklistSheet, FieldAnalysis, FieldKind, FieldSpec, SheetKind, MAX_FIELDS};
pub use control_chart::{ControlChart, ControlChartAnalyzer, ControlLimits, ControlPoint};
pub use dashboard::{default_variables, Dashboard, DashboardBuilder, Kpi, DEFAULT_TITLE};
pub use dpmo::{
    reference_table, sigma_level, DpmoCalculator, DpmoInput, DpmoResult, SigmaBand, SigmaReference,
    SIGMA_REFERENCE,
};
pub use errors::{require_dataset, AnalysisError};
pub use histogram::{HistogramAnalysis, HistogramAnalyzer};
pub use ishikawa::{Cause, CauseCategory, CausesGraph, MAX_WHYS};
pub use pareto::{ParetoAnalysis, ParetoAnalyzer, ParetoContext, ParetoMeasure, ParetoRow};
pub use scatter::{CorrelationStrength, ScatterAnalysis, ScatterAnalyzer, ScatterPoint};
pub use stratification::{GroupStats, Stratification, StratificationAnalyzer};
