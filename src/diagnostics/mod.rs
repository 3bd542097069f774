//! Serializable evaluation report written by the tool binary.
//!
//! `EvaluationReport` bundles the headline accuracy with the confusion
//! counts, a per-class breakdown, prediction parsing statistics and the time
//! spent in each stage.

pub mod report;

pub use report::{ClassReport, EvaluationReport, StageTiming, TimingBreakdown};
