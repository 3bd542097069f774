#![doc = include_str!("../README.md")]

// Public modules
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod evaluate;
pub mod ground_truth;
pub mod io;
pub mod prediction;
pub mod types;

// --- High-level re-exports -------------------------------------------------

// Main entry points: evaluator + results.
pub use crate::evaluate::{Accuracy, AccuracyEvaluator, Evaluation, EvaluationParams, Tally};
pub use crate::prediction::PredictionSet;

pub use crate::diagnostics::EvaluationReport;
pub use crate::error::EvalError;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use tree_eval::prelude::*;
/// use std::path::Path;
///
/// # fn main() -> Result<(), EvalError> {
/// let evaluator = AccuracyEvaluator::default();
/// let report = evaluator.evaluate_files(
///     "2_ac",
///     Path::new("wrl_files/AlgoOutput/tree_2_ac_final.wrl"),
///     Path::new("confidence_files/oakland_part2_ac_conf.txt"),
/// )?;
/// println!("{} accuracy={}", report.variant, report.accuracy);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::ground_truth::GroundTruthRecord;
    pub use crate::types::{ForegroundClasses, PointKey, Precision};
    pub use crate::{AccuracyEvaluator, EvalError, EvaluationParams, PredictionSet};
}
