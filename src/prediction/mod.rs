//! Predicted tree points read from VRML point-set files.
//!
//! The segmentation writes its output as a VRML V1.0 scene whose
//! `Coordinate3 { point [ ... ] }` block lists every point assigned to a tree
//! cluster. [`PredictionSet`] collects those points into quantized
//! [`PointKey`]s so ground-truth rows can be looked up in O(1).
//!
//! - [`scanner`]: line state machine locating and parsing the point block.
//! - [`writer`]: emits the same layout, used to produce fixtures and exports.

pub mod scanner;
pub mod writer;

pub use scanner::{PointBlockScanner, ScanState, ScanStep};
pub use writer::{write_point_set, CLUSTER_PALETTE};

use crate::error::{EvalError, Result};
use crate::io::read_text;
use crate::types::{PointKey, Precision};
use log::debug;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// Bookkeeping collected while building a [`PredictionSet`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionStats {
    /// Coordinate rows parsed inside the point block (padding excluded).
    pub rows: usize,
    /// `0.000000 0.000000 0.000000,` rows skipped.
    pub padding_rows: usize,
    /// Rows whose quantized key was already present.
    pub duplicates: usize,
}

/// Immutable set of predicted point keys.
#[derive(Clone, Debug)]
pub struct PredictionSet {
    keys: HashSet<PointKey>,
    precision: Precision,
    stats: PredictionStats,
}

impl PredictionSet {
    fn empty(precision: Precision) -> Self {
        Self {
            keys: HashSet::new(),
            precision,
            stats: PredictionStats::default(),
        }
    }

    /// Build a set from raw coordinates, quantizing each one.
    ///
    /// Errors name the 1-based position of the first point that does not fit
    /// the key range at `precision`.
    pub fn from_points<I>(points: I, precision: Precision) -> Result<Self>
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        let mut set = Self::empty(precision);
        for (idx, p) in points.into_iter().enumerate() {
            set.insert(idx + 1, p)?;
        }
        Ok(set)
    }

    /// Parse the point block of a VRML document.
    pub fn parse(text: &str, precision: Precision) -> Result<Self> {
        let mut set = Self::empty(precision);
        let mut scanner = PointBlockScanner::new();
        for (idx, line) in text.lines().enumerate() {
            match scanner.feed(idx + 1, line)? {
                ScanStep::Point(p) => set.insert(idx + 1, p)?,
                ScanStep::Padding => set.stats.padding_rows += 1,
                ScanStep::Skip => {}
                ScanStep::Finished => break,
            }
        }
        scanner.finish()?;
        debug!(
            "PredictionSet::parse rows={} unique={} padding={} duplicates={}",
            set.stats.rows,
            set.keys.len(),
            set.stats.padding_rows,
            set.stats.duplicates
        );
        Ok(set)
    }

    /// Read and parse a prediction file from disk.
    pub fn load(path: &Path, precision: Precision) -> Result<Self> {
        let text = read_text(path)?;
        Self::parse(&text, precision)
    }

    fn insert(&mut self, line: usize, p: [f64; 3]) -> Result<()> {
        let key = PointKey::quantize(p[0], p[1], p[2], self.precision).ok_or_else(|| {
            EvalError::MalformedPrediction {
                line,
                reason: format!(
                    "point ({}, {}, {}) is out of range at {} decimals",
                    p[0],
                    p[1],
                    p[2],
                    self.precision.decimals()
                ),
            }
        })?;
        self.stats.rows += 1;
        if !self.keys.insert(key) {
            self.stats.duplicates += 1;
        }
        Ok(())
    }

    pub fn contains(&self, key: &PointKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn stats(&self) -> PredictionStats {
        self.stats
    }

    pub fn keys(&self) -> impl Iterator<Item = &PointKey> {
        self.keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = "#VRML V1.0 ascii

Separator {
  Material {
    diffuseColor [
      0 0 1,
       0 0 0 ]
  }
  Coordinate3 {
    point [
      1.234 5.678 9.012,
      0.000000 0.000000 0.000000,
      1.2341 5.6779 9.0119,
      -3.5 2.0 0.125,
       0 0 0 ]
}
  PointSet {
    startIndex 0
    numPoints 4
  }
}
";

    #[test]
    fn parse_collects_rounded_unique_keys() {
        let p = Precision::default();
        let set = PredictionSet::parse(SCENE, p).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&PointKey { x: 123, y: 568, z: 901 }));
        assert!(set.contains(&PointKey::quantize(-3.5, 2.0, 0.12, p).unwrap()));
        assert_eq!(
            set.stats(),
            PredictionStats {
                rows: 3,
                padding_rows: 1,
                duplicates: 1,
            }
        );
    }

    #[test]
    fn color_terminator_before_points_is_ignored() {
        // The `0 0 0 ]` closing diffuseColor precedes `point [` and must not end the scan.
        let set = PredictionSet::parse(SCENE, Precision::default()).unwrap();
        assert!(!set.is_empty());
    }

    #[test]
    fn missing_marker_is_an_error() {
        let err = PredictionSet::parse("#VRML V1.0 ascii\n1 2 3,\n", Precision::default())
            .unwrap_err();
        assert!(matches!(err, EvalError::MissingPointBlock));
    }

    #[test]
    fn missing_terminator_is_an_error() {
        let err = PredictionSet::parse("point [\n1 2 3,\n", Precision::default()).unwrap_err();
        assert!(matches!(err, EvalError::UnterminatedPointBlock { line: 1 }));
    }

    #[test]
    fn huge_coordinate_is_rejected_with_line() {
        let text = "point [\n1.0 2.0 3.0,\n1e300 0 0,\n0 0 0 ]\n";
        match PredictionSet::parse(text, Precision::default()).unwrap_err() {
            EvalError::MalformedPrediction { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("out of range"), "unexpected reason: {reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(matches!(
            PredictionSet::from_points([[0.0, 0.0, 0.0], [0.0, 9e17, 0.0]], Precision::default()),
            Err(EvalError::MalformedPrediction { line: 2, .. })
        ));
    }

    #[test]
    fn empty_block_yields_empty_set() {
        let set = PredictionSet::parse("point [\n0 0 0 ]\n", Precision::default()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.stats(), PredictionStats::default());
    }
}
