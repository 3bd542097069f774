//! Labeled ground-truth point files.
//!
//! One point per line, whitespace separated: `x y z ... class_id last_field`.
//! Only the coordinates and the second-to-last column are used. Lines starting
//! with `#` are comments.

use crate::error::{EvalError, Result};
use crate::io::read_text;
use crate::types::{ClassId, PointKey, Precision};
use log::debug;
use std::path::Path;

/// Minimum columns per row: x, y, z, class id and one trailing field.
pub const MIN_COLUMNS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundTruthRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub class_id: ClassId,
    /// 1-based line in the source file.
    pub line: usize,
}

impl GroundTruthRecord {
    /// Matching key at `precision`; out-of-range coordinates are reported
    /// against the row's source line.
    pub fn key(&self, precision: Precision) -> Result<PointKey> {
        PointKey::quantize(self.x, self.y, self.z, precision).ok_or_else(|| {
            EvalError::MalformedGroundTruth {
                line: self.line,
                reason: format!(
                    "point ({}, {}, {}) is out of range at {} decimals",
                    self.x,
                    self.y,
                    self.z,
                    precision.decimals()
                ),
            }
        })
    }
}

/// Parse one line. Returns `Ok(None)` for comments and blank lines.
pub fn parse_record(line_no: usize, line: &str) -> Result<Option<GroundTruthRecord>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_COLUMNS {
        return Err(EvalError::MalformedGroundTruth {
            line: line_no,
            reason: format!(
                "expected at least {MIN_COLUMNS} columns, found {}",
                tokens.len()
            ),
        });
    }
    let class_token = tokens[tokens.len() - 2];
    let class_id = class_token
        .parse::<ClassId>()
        .map_err(|e| EvalError::MalformedGroundTruth {
            line: line_no,
            reason: format!("class id `{class_token}` is not an integer: {e}"),
        })?;
    Ok(Some(GroundTruthRecord {
        x: parse_coord(line_no, tokens[0])?,
        y: parse_coord(line_no, tokens[1])?,
        z: parse_coord(line_no, tokens[2])?,
        class_id,
        line: line_no,
    }))
}

fn parse_coord(line_no: usize, token: &str) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(EvalError::MalformedGroundTruth {
            line: line_no,
            reason: format!("coordinate `{token}` is not a finite number"),
        }),
    }
}

/// Lazily parse every data row of `text`.
pub fn records(text: &str) -> impl Iterator<Item = Result<GroundTruthRecord>> + '_ {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_record(idx + 1, line).transpose())
}

/// Parse all rows, stopping at the first malformed one.
pub fn parse_records(text: &str) -> Result<Vec<GroundTruthRecord>> {
    let rows = records(text).collect::<Result<Vec<_>>>()?;
    debug!("ground_truth::parse_records rows={}", rows.len());
    Ok(rows)
}

/// Read and parse a ground-truth file from disk.
pub fn load_records(path: &Path) -> Result<Vec<GroundTruthRecord>> {
    let text = read_text(path)?;
    parse_records(&text)
}
