use std::path::PathBuf;

use relief_report::ErrorReport;

use crate::pipeline::ImportRun;

/// Result of the `import` command.
#[derive(Debug)]
pub struct ImportResult {
    pub run: ImportRun,
    pub report: ErrorReport,
    pub records_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub guardians_path: Option<PathBuf>,
}

impl ImportResult {
    pub fn has_rejections(&self) -> bool {
        self.run.outcome.has_errors()
    }
}
