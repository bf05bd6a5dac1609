//! Error report model.

use std::collections::BTreeMap;

use relief_model::ValidationError;
use serde::{Deserialize, Serialize};

use crate::category::ErrorCategory;

/// One line of the report, one per validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    /// Position in the report, starting at 1.
    pub number: usize,
    /// Row in the source file (header is row 1).
    pub row: usize,
    pub field: String,
    pub message: String,
    pub category: ErrorCategory,
}

/// Advice for one error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommonFix {
    pub category: ErrorCategory,
    pub advice: &'static str,
}

/// Human-readable rendering of an import's error list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
    pub lines: Vec<ReportLine>,
    counts: BTreeMap<ErrorCategory, usize>,
}

impl ErrorReport {
    /// Build a report, keeping the order of `errors`.
    pub fn build(errors: &[ValidationError]) -> Self {
        let mut counts: BTreeMap<ErrorCategory, usize> =
            ErrorCategory::ALL.iter().map(|category| (*category, 0)).collect();
        let lines = errors
            .iter()
            .enumerate()
            .map(|(index, error)| {
                let category = ErrorCategory::classify(error.kind);
                *counts.entry(category).or_default() += 1;
                ReportLine {
                    number: index + 1,
                    row: error.row,
                    field: error.field.clone(),
                    message: error.message.clone(),
                    category,
                }
            })
            .collect();
        Self { lines, counts }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> usize {
        self.lines.len()
    }

    pub fn count(&self, category: ErrorCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Per-category counts, every category included.
    pub fn counts(&self) -> impl Iterator<Item = (ErrorCategory, usize)> + '_ {
        ErrorCategory::ALL
            .into_iter()
            .map(move |category| (category, self.count(category)))
    }

    /// Number of distinct source rows with at least one error.
    pub fn affected_rows(&self) -> usize {
        let mut rows: Vec<usize> = self.lines.iter().map(|line| line.row).collect();
        rows.sort_unstable();
        rows.dedup();
        rows.len()
    }

    /// Standing advice for every category, independent of the errors found.
    pub fn common_fixes() -> Vec<CommonFix> {
        ErrorCategory::ALL
            .iter()
            .map(|category| CommonFix {
                category: *category,
                advice: category.common_fix(),
            })
            .collect()
    }
}
