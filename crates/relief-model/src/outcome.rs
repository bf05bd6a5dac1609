use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::record::CommittableRecord;

/// What went wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required value missing.
    Missing,
    /// Value is not one of the allowed options.
    InvalidChoice,
    /// Value is not a non-negative whole number.
    InvalidNumber,
    /// Value could not be read as a date.
    InvalidDate,
    /// Referenced entity does not exist.
    ReferenceNotFound,
    /// Referenced entity exists but fails an eligibility condition.
    ReferenceIneligible,
    /// Record collides with an existing one.
    Duplicate,
}

/// A row-addressable problem reported back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Row number in the original file (header is row 1).
    pub row: usize,
    /// Column label the error refers to.
    pub field: String,
    pub message: String,
    pub kind: ErrorKind,
}

impl ValidationError {
    pub fn new(row: usize, field: &str, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.to_string(),
            message: message.into(),
            kind,
        }
    }
}

/// Result of one batch run: committable records and the full error list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub committable: Vec<CommittableRecord>,
    pub errors: Vec<ValidationError>,
    /// Number of input rows the batch processed.
    pub total_rows: usize,
}

impl ImportOutcome {
    /// Distinct row numbers that have at least one error, ascending.
    pub fn rejected_rows(&self) -> BTreeSet<usize> {
        self.errors.iter().map(|error| error.row).collect()
    }

    pub fn accepted_count(&self) -> usize {
        self.committable.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected_rows().len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors for one row, in the order they were found.
    pub fn errors_for_row(&self, row: usize) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |error| error.row == row)
    }

    /// True when every input row is either committable or rejected, never both.
    pub fn is_fully_accounted(&self) -> bool {
        let rejected = self.rejected_rows();
        let overlap = self
            .committable
            .iter()
            .any(|record| rejected.contains(&record.row));
        !overlap && self.committable.len() + rejected.len() == self.total_rows
    }

    /// Move committable records into the error list.
    ///
    /// Used by callers that run their own checks after the batch, such as
    /// duplicate detection between sibling rows.
    pub fn reject(&mut self, errors: Vec<ValidationError>) {
        let rows: BTreeSet<usize> = errors.iter().map(|error| error.row).collect();
        self.committable.retain(|record| !rows.contains(&record.row));
        self.errors.extend(errors);
        self.errors.sort_by_key(|error| error.row);
    }
}
