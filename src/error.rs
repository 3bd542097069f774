//! Error type shared by the parsers, the evaluator and the tool binary.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("prediction file has no `point [` block")]
    MissingPointBlock,

    /// Input ended before the `0 0 0 ]` terminator. `line` is where the block opened.
    #[error("point block opened at line {line} is never closed by `0 0 0 ]`")]
    UnterminatedPointBlock { line: usize },

    #[error("malformed prediction row at line {line}: {reason}")]
    MalformedPrediction { line: usize, reason: String },

    #[error("malformed ground-truth row at line {line}: {reason}")]
    MalformedGroundTruth { line: usize, reason: String },

    #[error("ground-truth file contains no data rows")]
    EmptyGroundTruth,

    #[error("failed to serialize JSON for {}: {message}", path.display())]
    Json { path: PathBuf, message: String },
}

impl EvalError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = EvalError> = std::result::Result<T, E>;
