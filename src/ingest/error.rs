//! Errors raised while loading the source files.
//!
//! Only failures that abort a whole derivation live here. Bad dates and bad
//! matrix cells degrade to `None` / `0.0` inside their loaders instead.

use std::path::{Path, PathBuf};

/// Fatal load errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The file is missing, unreadable, or not decodable as CSV text.
    Read { path: PathBuf, message: String },
    /// One or more required columns are absent from the header row.
    Schema { missing: Vec<String> },
}

impl LoadError {
    pub(crate) fn read(path: &Path, err: impl std::fmt::Display) -> Self {
        LoadError::Read {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Read { path, message } => {
                write!(f, "Failed to read {}: {message}", path.display())
            }
            LoadError::Schema { missing } => write!(
                f,
                "CSV is missing required column(s) {}; headers must include NodeId, StartDate, EndDate",
                missing.join(", ")
            ),
        }
    }
}

impl std::error::Error for LoadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_message() {
        let err = LoadError::Schema {
            missing: vec!["EndDate".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("missing required column"));
        assert!(msg.contains("EndDate"));
    }

    #[test]
    fn test_read_error_names_path() {
        let err = LoadError::read(Path::new("data/nope.csv"), "No such file or directory");
        assert!(err.to_string().contains("data/nope.csv"));
    }
}
