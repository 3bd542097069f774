use crate::error::{EvalError, Result};
use crate::evaluate::EvaluationParams;
use crate::types::{ForegroundClasses, Precision};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct AccuracyToolConfig {
    /// Label printed with the result. Defaults to the ground-truth file stem.
    #[serde(default)]
    pub variant: Option<String>,
    /// VRML file holding the predicted tree points.
    pub prediction: PathBuf,
    /// Labeled point file.
    pub ground_truth: PathBuf,
    #[serde(default)]
    pub matching: MatchingConfig,
    /// Class ids that count as tree points. Defaults to the five tree parts.
    #[serde(default)]
    pub foreground_classes: Option<ForegroundClasses>,
    #[serde(default)]
    pub output: AccuracyOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Decimals both point sources are rounded to before comparison.
    pub decimals: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            decimals: Precision::default().decimals(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AccuracyOutputConfig {
    /// Optional path for a JSON `EvaluationReport`.
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

impl AccuracyToolConfig {
    pub fn variant_name(&self) -> String {
        self.variant.clone().unwrap_or_else(|| {
            self.ground_truth
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "unnamed".to_string())
        })
    }

    /// Validate and convert into evaluator parameters.
    pub fn resolve(&self, path: &Path) -> Result<EvaluationParams> {
        let precision =
            Precision::new(self.matching.decimals).ok_or_else(|| EvalError::Config {
                path: path.to_path_buf(),
                message: format!(
                    "matching.decimals must be at most {}, got {}",
                    Precision::MAX_DECIMALS,
                    self.matching.decimals
                ),
            })?;
        let foreground = match &self.foreground_classes {
            Some(classes) if classes.is_empty() => {
                return Err(EvalError::Config {
                    path: path.to_path_buf(),
                    message: "foreground_classes must not be empty".to_string(),
                })
            }
            Some(classes) => classes.clone(),
            None => ForegroundClasses::tree_parts(),
        };
        Ok(EvaluationParams {
            precision,
            foreground,
        })
    }
}

pub fn parse_config(path: &Path, data: &str) -> Result<AccuracyToolConfig> {
    serde_json::from_str(data).map_err(|e| EvalError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub fn load_config(path: &Path) -> Result<AccuracyToolConfig> {
    let data = fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;
    parse_config(path, &data)
}
