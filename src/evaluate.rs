//! Point-level classification accuracy of predicted tree points.
//!
//! Every ground-truth row is classified on its own:
//! - foreground class and predicted → true positive;
//! - foreground class and not predicted → false negative (missed);
//! - background class and not predicted → true negative;
//! - background class and predicted → false positive.
//!
//! Accuracy is `100 * correct / (correct + wrong)` rounded to two decimals,
//! where correct = TP + TN and wrong = FN + FP.

use crate::diagnostics::{ClassReport, EvaluationReport, TimingBreakdown};
use crate::error::{EvalError, Result};
use crate::ground_truth::{load_records, GroundTruthRecord};
use crate::prediction::PredictionSet;
use crate::types::{class_label, ClassId, ForegroundClasses, PointKey, Precision};
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    TruePositive,
    FalseNegative,
    TrueNegative,
    FalsePositive,
}

impl Outcome {
    pub fn is_correct(self) -> bool {
        matches!(self, Outcome::TruePositive | Outcome::TrueNegative)
    }
}

/// Classify a single row against the prediction set.
///
/// Fails only when the row's coordinates do not fit the key range at the
/// prediction set's precision.
pub fn classify(
    record: &GroundTruthRecord,
    predictions: &PredictionSet,
    foreground: &ForegroundClasses,
) -> Result<Outcome> {
    let key = record.key(predictions.precision())?;
    let predicted = predictions.contains(&key);
    Ok(match (foreground.contains(record.class_id), predicted) {
        (true, true) => Outcome::TruePositive,
        (true, false) => Outcome::FalseNegative,
        (false, false) => Outcome::TrueNegative,
        (false, true) => Outcome::FalsePositive,
    })
}

/// Confusion counts over a sequence of rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub true_positive: usize,
    pub false_negative: usize,
    pub true_negative: usize,
    pub false_positive: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::TruePositive => self.true_positive += 1,
            Outcome::FalseNegative => self.false_negative += 1,
            Outcome::TrueNegative => self.true_negative += 1,
            Outcome::FalsePositive => self.false_positive += 1,
        }
    }

    pub fn correct(&self) -> usize {
        self.true_positive + self.true_negative
    }

    pub fn wrong(&self) -> usize {
        self.false_negative + self.false_positive
    }

    pub fn total(&self) -> usize {
        self.correct() + self.wrong()
    }

    pub fn accuracy(&self) -> Result<Accuracy> {
        Accuracy::from_counts(self.correct(), self.wrong())
    }

    /// Fraction of predicted ground-truth rows that are foreground.
    pub fn precision(&self) -> Option<f64> {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    /// Fraction of foreground rows that were predicted.
    pub fn recall(&self) -> Option<f64> {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }
}

fn ratio(num: usize, den: usize) -> Option<f64> {
    (den > 0).then(|| num as f64 / den as f64)
}

/// Count outcomes for all `records`. Pure: depends only on its inputs.
pub fn tally<'a, I>(
    records: I,
    predictions: &PredictionSet,
    foreground: &ForegroundClasses,
) -> Result<Tally>
where
    I: IntoIterator<Item = &'a GroundTruthRecord>,
{
    records
        .into_iter()
        .try_fold(Tally::default(), |mut acc, rec| {
            acc.record(classify(rec, predictions, foreground)?);
            Ok(acc)
        })
}

/// Accuracy percentage, rounded to two decimals.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Accuracy(f64);

impl Accuracy {
    pub fn from_counts(correct: usize, wrong: usize) -> Result<Self> {
        let total = correct + wrong;
        if total == 0 {
            return Err(EvalError::EmptyGroundTruth);
        }
        let pct = 100.0 * correct as f64 / total as f64;
        Ok(Self((pct * 100.0).round_ties_even() / 100.0))
    }

    pub fn percent(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Knobs shared by every evaluation.
#[derive(Clone, Debug, Default)]
pub struct EvaluationParams {
    /// Decimals both point sources are rounded to before matching.
    pub precision: Precision,
    pub foreground: ForegroundClasses,
}

/// Result of comparing one prediction set with one ground-truth file.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub accuracy: Accuracy,
    pub tally: Tally,
    pub per_class: BTreeMap<ClassId, Tally>,
    /// Predicted points that matched no ground-truth row.
    pub unmatched_predictions: usize,
}

pub struct AccuracyEvaluator {
    params: EvaluationParams,
}

impl Default for AccuracyEvaluator {
    fn default() -> Self {
        Self::new(EvaluationParams::default())
    }
}

impl AccuracyEvaluator {
    pub fn new(params: EvaluationParams) -> Self {
        Self { params }
    }

    /// Compare parsed rows with a prediction set.
    ///
    /// Rows are quantized with the prediction set's precision so both sides
    /// always share a key space.
    pub fn evaluate(
        &self,
        predictions: &PredictionSet,
        records: &[GroundTruthRecord],
    ) -> Result<Evaluation> {
        let foreground = &self.params.foreground;
        let total = tally(records, predictions, foreground)?;
        let accuracy = total.accuracy()?;

        let mut by_class: BTreeMap<ClassId, Vec<&GroundTruthRecord>> = BTreeMap::new();
        for rec in records {
            by_class.entry(rec.class_id).or_default().push(rec);
        }
        let per_class = by_class
            .into_iter()
            .map(|(class_id, rows)| {
                tally(rows, predictions, foreground).map(|counts| (class_id, counts))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        // Keys already validated by `tally` above.
        let mut matched: HashSet<PointKey> = HashSet::new();
        for rec in records {
            let key = rec.key(predictions.precision())?;
            if predictions.contains(&key) {
                matched.insert(key);
            }
        }

        debug!(
            "AccuracyEvaluator::evaluate rows={} tp={} fn={} tn={} fp={} accuracy={}",
            total.total(),
            total.true_positive,
            total.false_negative,
            total.true_negative,
            total.false_positive,
            accuracy
        );
        Ok(Evaluation {
            accuracy,
            tally: total,
            per_class,
            unmatched_predictions: predictions.len() - matched.len(),
        })
    }

    /// Load both files, evaluate and assemble a report with stage timings.
    pub fn evaluate_files(
        &self,
        variant: &str,
        prediction_path: &Path,
        ground_truth_path: &Path,
    ) -> Result<EvaluationReport> {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let predictions = timings.measure("parse_prediction", || {
            PredictionSet::load(prediction_path, self.params.precision)
        })?;
        let records = timings.measure("parse_ground_truth", || load_records(ground_truth_path))?;
        let evaluation = timings.measure("classify", || self.evaluate(&predictions, &records))?;
        timings.total_ms = elapsed_ms(total_start);

        let per_class = evaluation
            .per_class
            .iter()
            .map(|(&class_id, tally)| ClassReport {
                class_id,
                label: class_label(class_id),
                foreground: self.params.foreground.contains(class_id),
                rows: tally.total(),
                tally: *tally,
            })
            .collect();

        Ok(EvaluationReport {
            variant: variant.to_string(),
            prediction: prediction_path.to_path_buf(),
            ground_truth: ground_truth_path.to_path_buf(),
            decimals: predictions.precision().decimals(),
            accuracy: evaluation.accuracy,
            tally: evaluation.tally,
            foreground_precision: evaluation.tally.precision(),
            foreground_recall: evaluation.tally.recall(),
            per_class,
            predictions: predictions.stats(),
            unique_predictions: predictions.len(),
            unmatched_predictions: evaluation.unmatched_predictions,
            timings,
        })
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
