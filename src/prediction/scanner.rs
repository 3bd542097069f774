use crate::error::{EvalError, Result};

/// Trimmed line opening the coordinate block.
pub const BLOCK_START: &str = "point [";
/// Trimmed line closing the coordinate block.
pub const BLOCK_END: &str = "0 0 0 ]";
/// Placeholder row written for empty clusters; never a prediction.
pub const PADDING_ROW: &str = "0.000000 0.000000 0.000000,";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    /// Before `point [`.
    Seeking,
    /// Inside the block; `opened_at` is the 1-based line of the marker.
    Collecting { opened_at: usize },
    /// After `0 0 0 ]`; remaining input is ignored.
    Done,
}

/// Outcome of feeding one line to the scanner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScanStep {
    Skip,
    Padding,
    Point([f64; 3]),
    Finished,
}

/// Line-driven state machine over a VRML document.
#[derive(Clone, Debug)]
pub struct PointBlockScanner {
    state: ScanState,
}

impl Default for PointBlockScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl PointBlockScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::Seeking,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Feed the next line. `line_no` is 1-based and only used for errors.
    pub fn feed(&mut self, line_no: usize, line: &str) -> Result<ScanStep> {
        let line = line.trim();
        match self.state {
            ScanState::Seeking => {
                if line == BLOCK_START {
                    self.state = ScanState::Collecting { opened_at: line_no };
                }
                Ok(ScanStep::Skip)
            }
            ScanState::Collecting { .. } => {
                if line == BLOCK_END {
                    self.state = ScanState::Done;
                    Ok(ScanStep::Finished)
                } else if line.is_empty() || line == BLOCK_START {
                    // A repeated marker keeps the block open at its first line.
                    Ok(ScanStep::Skip)
                } else if line == PADDING_ROW {
                    Ok(ScanStep::Padding)
                } else {
                    parse_point_row(line_no, line).map(ScanStep::Point)
                }
            }
            ScanState::Done => Ok(ScanStep::Skip),
        }
    }

    /// Check the scanner reached a valid final state once input is exhausted.
    pub fn finish(&self) -> Result<()> {
        match self.state {
            ScanState::Seeking => Err(EvalError::MissingPointBlock),
            ScanState::Collecting { opened_at } => {
                Err(EvalError::UnterminatedPointBlock { line: opened_at })
            }
            ScanState::Done => Ok(()),
        }
    }
}

/// Parse `x y z,`: three whitespace separated numbers, the last one
/// optionally followed by a comma.
fn parse_point_row(line_no: usize, line: &str) -> Result<[f64; 3]> {
    let mut tokens = line.split_whitespace();
    let mut next = |axis: &str| {
        tokens.next().ok_or_else(|| EvalError::MalformedPrediction {
            line: line_no,
            reason: format!("missing {axis} coordinate"),
        })
    };
    let x = next("x")?;
    let y = next("y")?;
    let z = next("z")?;
    let z = z.split(',').next().unwrap_or(z);
    Ok([
        parse_coord(line_no, x)?,
        parse_coord(line_no, y)?,
        parse_coord(line_no, z)?,
    ])
}

fn parse_coord(line_no: usize, token: &str) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(EvalError::MalformedPrediction {
            line: line_no,
            reason: format!("non-finite coordinate `{token}`"),
        }),
        Err(e) => Err(EvalError::MalformedPrediction {
            line: line_no,
            reason: format!("`{token}` is not a number: {e}"),
        }),
    }
}
