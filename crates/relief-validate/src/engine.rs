//! Batch import.
//!
//! [`ImportBatch`] is the engine's entry point: it validates every row
//! independently, checks otherwise-valid rows against the caller's persisted
//! collection, and partitions the batch into committable records and errors.

use std::time::Instant;

use chrono::NaiveDate;
use relief_model::{ImportOutcome, RawRow, RecordSpec, StoredRecord};
use tracing::{debug, info, info_span};

use crate::duplicate::{DuplicateDetector, existing_duplicate_error};
use crate::record::{RowContext, validate_row};
use crate::reference::ReferenceSnapshot;

/// Row number of the first data row; the header occupies row 1.
pub const FIRST_DATA_ROW: usize = 2;

/// Source row of `row`, falling back to its position after the header.
fn source_row_number(row: &RawRow, index: usize) -> usize {
    row.source_row().unwrap_or(index + FIRST_DATA_ROW)
}

/// One import run over a set of rows.
#[derive(Debug, Clone, Copy)]
pub struct ImportBatch<'a> {
    spec: &'a RecordSpec,
    references: &'a ReferenceSnapshot,
    existing: &'a [StoredRecord],
    editing: Option<&'a str>,
    as_of: Option<NaiveDate>,
}

impl<'a> ImportBatch<'a> {
    pub fn new(spec: &'a RecordSpec, references: &'a ReferenceSnapshot) -> Self {
        Self {
            spec,
            references,
            existing: &[],
            editing: None,
            as_of: None,
        }
    }

    /// Reference date for derived ages.
    #[must_use]
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Persisted records that accepted rows must not duplicate.
    #[must_use]
    pub fn with_existing(mut self, existing: &'a [StoredRecord]) -> Self {
        self.existing = existing;
        self
    }

    /// Exclude the persisted record with this id from duplicate checks.
    #[must_use]
    pub fn editing(mut self, id: &'a str) -> Self {
        self.editing = Some(id);
        self
    }

    pub fn run(&self, rows: &[RawRow]) -> ImportOutcome {
        let span = info_span!("import", entity = %self.spec.entity);
        let _guard = span.enter();
        let start = Instant::now();

        let context = RowContext::new(self.references).as_of(self.as_of);
        let detector = DuplicateDetector::new(&self.spec.duplicates).editing(self.editing);
        let mut outcome = ImportOutcome {
            total_rows: rows.len(),
            ..ImportOutcome::default()
        };

        for (index, row) in rows.iter().enumerate() {
            let row_number = source_row_number(row, index);
            let checked = validate_row(self.spec, row, row_number, &context).and_then(|record| {
                match detector.check(&record, self.existing) {
                    Some(found) => Err(vec![existing_duplicate_error(
                        self.spec, row_number, &found,
                    )]),
                    None => Ok(record),
                }
            });
            match checked {
                Ok(record) => outcome.committable.push(record),
                Err(errors) => {
                    debug!(row = row_number, error_count = errors.len(), "row rejected");
                    outcome.errors.extend(errors);
                }
            }
        }

        info!(
            rows = outcome.total_rows,
            accepted = outcome.accepted_count(),
            rejected = outcome.rejected_count(),
            errors = outcome.errors.len(),
            duration_ms = start.elapsed().as_millis(),
            "import validated"
        );
        outcome
    }
}

/// Validate `rows` with no persisted collection and no as-of date.
pub fn run(spec: &RecordSpec, rows: &[RawRow], references: &ReferenceSnapshot) -> ImportOutcome {
    ImportBatch::new(spec, references).run(rows)
}
