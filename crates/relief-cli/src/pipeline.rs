//! Import pipeline stages used by the `import` command.
//!
//! 1. Load rows, reference collections and persisted records
//! 2. Run the engine
//! 3. Optionally reject rows that repeat earlier rows of the same file
//! 4. Compute and apply post-commit guardian updates

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use relief_ingest::{
    HeaderCheck, check_headers, load_existing, load_guardians, load_martyrs, read_rows,
};
use relief_model::{
    EntityKind, Guardian, ImportOutcome, RawRow, RecordSpec, ReferenceSet, ReferenceUpdate,
    StoredRecord,
};
use relief_validate::{
    DuplicateDetector, ImportBatch, ReferenceIndex, ReferenceSnapshot, post_commit_updates,
    spec_for,
};
use tracing::{debug, info, info_span, trace, warn};

use crate::logging::redact_value;

/// Inputs for one import run.
#[derive(Debug, Clone, Copy)]
pub struct ImportRequest<'a> {
    pub entity: EntityKind,
    pub rows: &'a Path,
    pub guardians: Option<&'a Path>,
    pub martyrs: Option<&'a Path>,
    pub existing: Option<&'a Path>,
    pub as_of: NaiveDate,
    pub check_batch_duplicates: bool,
}

/// Loaded inputs, before validation.
#[derive(Debug, Default)]
pub struct ImportInputs {
    pub rows: Vec<RawRow>,
    pub guardians: Option<Vec<Guardian>>,
    pub references: ReferenceSnapshot,
    pub existing: Vec<StoredRecord>,
}

/// Everything the `import` command reports on or writes out.
#[derive(Debug)]
pub struct ImportRun {
    pub entity: EntityKind,
    pub outcome: ImportOutcome,
    pub headers: HeaderCheck,
    /// Rows rejected because an earlier row of the same file had the same identity.
    pub batch_duplicates: usize,
    pub updates: Vec<ReferenceUpdate>,
    /// Guardian collection with `updates` applied, when guardians were supplied.
    pub updated_guardians: Option<Vec<Guardian>>,
}

pub fn load_inputs(spec: &RecordSpec, request: &ImportRequest<'_>) -> Result<ImportInputs> {
    let span = info_span!("load", entity = %request.entity);
    let _guard = span.enter();
    let start = Instant::now();

    let rows = read_rows(request.rows)
        .with_context(|| format!("read rows from {}", request.rows.display()))?;

    let mut inputs = ImportInputs {
        rows,
        ..ImportInputs::default()
    };
    for set in spec.reference_sets() {
        match (set, request.guardians, request.martyrs) {
            (ReferenceSet::Guardians, Some(path), _) => {
                let guardians = load_guardians(path)
                    .with_context(|| format!("load guardians from {}", path.display()))?;
                inputs
                    .references
                    .insert(ReferenceIndex::from_guardians(guardians.clone()));
                inputs.guardians = Some(guardians);
            }
            (ReferenceSet::Martyrs, _, Some(path)) => {
                let martyrs = load_martyrs(path)
                    .with_context(|| format!("load martyrs from {}", path.display()))?;
                inputs.references.insert(ReferenceIndex::from_martyrs(martyrs));
            }
            (set, _, _) => warn!(
                set = %set,
                "no {set} collection given; {} references cannot be resolved",
                set.singular()
            ),
        }
    }
    if let Some(path) = request.existing {
        inputs.existing = load_existing(path)
            .with_context(|| format!("load existing records from {}", path.display()))?;
    }

    debug!(
        rows = inputs.rows.len(),
        existing = inputs.existing.len(),
        duration_ms = start.elapsed().as_millis(),
        "inputs loaded"
    );
    Ok(inputs)
}

/// Header differences between the file and the record spec, from the first row's labels.
pub fn inspect_headers(spec: &RecordSpec, rows: &[RawRow]) -> HeaderCheck {
    let Some(first) = rows.first() else {
        return HeaderCheck::default();
    };
    let check = check_headers(spec, first.labels());
    if !check.missing_required.is_empty() {
        warn!(
            columns = %check.missing_required.join(", "),
            "required columns are missing; every row will be rejected for them"
        );
    }
    if !check.unknown.is_empty() {
        warn!(columns = %check.unknown.join(", "), "ignoring unknown columns");
    }
    check
}

/// Move rows that repeat an earlier row of the batch into the error list.
/// Returns the number of rows rejected.
pub fn reject_batch_duplicates(spec: &RecordSpec, outcome: &mut ImportOutcome) -> usize {
    let detector = DuplicateDetector::new(&spec.duplicates);
    let errors = detector.batch_duplicates(spec, &outcome.committable);
    let count = errors.len();
    if count > 0 {
        info!(rows = count, "rows repeat earlier rows of the same file");
        outcome.reject(errors);
    }
    count
}

/// Post-commit updates for every accepted record, applied to `guardians`.
pub fn apply_updates(
    outcome: &ImportOutcome,
    guardians: Option<&mut [Guardian]>,
) -> Vec<ReferenceUpdate> {
    let updates: Vec<ReferenceUpdate> = outcome
        .committable
        .iter()
        .flat_map(post_commit_updates)
        .collect();
    let Some(guardians) = guardians else {
        return updates;
    };
    let mut unmatched = 0usize;
    for update in &updates {
        if update.apply(guardians) {
            trace!(
                guardian = redact_value(update.guardian_national_id()),
                "guardian counters updated"
            );
        } else {
            unmatched += 1;
        }
    }
    if unmatched > 0 {
        warn!(unmatched, "some updates name guardians missing from the collection");
    }
    updates
}

pub fn run_import_pipeline(request: &ImportRequest<'_>) -> Result<ImportRun> {
    let spec = spec_for(request.entity);
    let inputs = load_inputs(&spec, request)?;
    let headers = inspect_headers(&spec, &inputs.rows);

    let mut outcome = ImportBatch::new(&spec, &inputs.references)
        .as_of(request.as_of)
        .with_existing(&inputs.existing)
        .run(&inputs.rows);

    let batch_duplicates = if request.check_batch_duplicates {
        reject_batch_duplicates(&spec, &mut outcome)
    } else {
        0
    };

    let mut guardians = inputs.guardians;
    let updates = apply_updates(&outcome, guardians.as_deref_mut());

    Ok(ImportRun {
        entity: request.entity,
        outcome,
        headers,
        batch_duplicates,
        updates,
        updated_guardians: guardians,
    })
}
