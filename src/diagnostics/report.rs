use crate::evaluate::{Accuracy, Tally};
use crate::prediction::PredictionStats;
use crate::types::ClassId;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Wall time of one evaluation stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: &'static str,
    pub elapsed_ms: f64,
}

/// Stage timings in execution order plus the end-to-end time.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Run `stage`, record how long it took under `label` and pass its result through.
    pub fn measure<R>(&mut self, label: &'static str, stage: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let result = stage();
        self.stages.push(StageTiming {
            label,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        });
        result
    }

    pub fn stage(&self, label: &str) -> Option<&StageTiming> {
        self.stages.iter().find(|s| s.label == label)
    }
}

/// Counts for the rows of a single ground-truth class.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassReport {
    pub class_id: ClassId,
    pub label: String,
    pub foreground: bool,
    pub rows: usize,
    pub tally: Tally,
}

/// Full result of one prediction/ground-truth comparison.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub variant: String,
    pub prediction: PathBuf,
    pub ground_truth: PathBuf,
    pub decimals: u32,
    pub accuracy: Accuracy,
    pub tally: Tally,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_precision: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_recall: Option<f64>,
    pub per_class: Vec<ClassReport>,
    pub predictions: PredictionStats,
    pub unique_predictions: usize,
    pub unmatched_predictions: usize,
    pub timings: TimingBreakdown,
}

impl EvaluationReport {
    /// Multi-line plain text summary printed by the tool binary.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "{}\nAccuracy: {}\n  rows={} correct={} wrong={}\n  tp={} fn={} tn={} fp={}\n",
            self.variant,
            self.accuracy,
            self.tally.total(),
            self.tally.correct(),
            self.tally.wrong(),
            self.tally.true_positive,
            self.tally.false_negative,
            self.tally.true_negative,
            self.tally.false_positive,
        );
        out.push_str(&format!(
            "  predictions: unique={} unmatched={} padding={} duplicates={}\n",
            self.unique_predictions,
            self.unmatched_predictions,
            self.predictions.padding_rows,
            self.predictions.duplicates,
        ));
        out.push_str(&format!(
            "  foreground precision={} recall={}\n",
            format_optional(self.foreground_precision),
            format_optional(self.foreground_recall),
        ));
        for class in self.per_class.iter().filter(|c| c.foreground) {
            out.push_str(&format!(
                "  {:<13} rows={:<8} hit={:<8} missed={}\n",
                class.label, class.rows, class.tally.true_positive, class.tally.false_negative,
            ));
        }
        out
    }
}

fn format_optional(val: Option<f64>) -> String {
    val.map(|v| format!("{:.3}", v))
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_records_stages_in_order() {
        let mut timings = TimingBreakdown::default();
        let parsed: Result<u32, String> = timings.measure("parse", || Ok(7));
        let doubled = timings.measure("double", || parsed.map(|v| v * 2));
        assert_eq!(doubled, Ok(14));
        let labels: Vec<_> = timings.stages.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["parse", "double"]);
        assert!(timings.stage("double").unwrap().elapsed_ms >= 0.0);
        assert!(timings.stage("missing").is_none());
    }
}
