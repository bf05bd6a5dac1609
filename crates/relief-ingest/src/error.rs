//! Error types for row and reference loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop an import before any row is validated.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file {path} is too large ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    #[error("unsupported encoding {encoding} in {path}; save the file as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    #[error("unsupported file type '{extension}' for {path}; expected .csv or .json")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === CSV Errors ===
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("no header row found in {path}")]
    MissingHeader { path: PathBuf },

    #[error("column {index} has an empty header in {path}")]
    EmptyColumnName { path: PathBuf, index: usize },

    // === JSON Errors ===
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a JSON array of row objects in {path}")]
    NotAnArray { path: PathBuf },

    #[error("row {index} in {path} is not valid: {reason}")]
    InvalidJsonRow {
        path: PathBuf,
        index: usize,
        reason: String,
    },
}

impl IngestError {
    pub(crate) fn open(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/children.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/children.csv");
    }

    #[test]
    fn test_missing_file_maps_to_not_found() {
        let io = std::io::Error::from(std::io::ErrorKind::NotFound);
        let err = IngestError::open(std::path::Path::new("rows.csv"), io);
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
