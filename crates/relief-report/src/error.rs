use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown report format '{0}'; expected csv or json")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
