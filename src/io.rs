//! File helpers for the evaluation inputs and JSON reports.
//!
//! - `read_text`: read an input file into memory, mapping failures to [`EvalError::Io`].
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::error::{EvalError, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Read a UTF-8 text file fully.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| EvalError::io(path, e))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| EvalError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    fs::write(path, json).map_err(|e| EvalError::io(path, e))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| EvalError::io(parent, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_json_creates_missing_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/report.json");
        write_json_file(&path, &serde_json::json!({ "accuracy": 97.5 })).unwrap();
        let text = read_text(&path).unwrap();
        assert!(text.contains("\"accuracy\": 97.5"));
    }

    #[test]
    fn read_missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.txt");
        let err = read_text(&path).unwrap_err();
        assert!(matches!(err, EvalError::Io { .. }));
        assert!(err.to_string().contains("absent.txt"));
    }
}
