//! Duplicate detection.
//!
//! A candidate is a duplicate when its natural identifier equals that of an
//! existing record, or when every field of one of the entity's secondary
//! tuples matches case-insensitively. The engine runs this against the
//! caller's persisted collection. Checking rows of the same file against each
//! other is left to the caller, via [`DuplicateDetector::batch_duplicates`].

use relief_model::{
    CommittableRecord, DuplicateRule, ErrorKind, FieldLookup, RecordSpec, StoredRecord,
    ValidationError,
};

/// Which part of the rule matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchedBy {
    Identifier,
    /// The secondary tuple (target field names) that matched.
    Fields(Vec<String>),
}

/// A collision between a candidate and an existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMatch {
    pub matched_by: MatchedBy,
    /// Position of the colliding record in the collection searched.
    pub position: usize,
    /// Identifier of the colliding record, when persisted with one.
    pub existing_id: Option<String>,
    /// Identifier value of the candidate.
    pub identifier: String,
}

#[derive(Debug, Clone, Copy)]
pub struct DuplicateDetector<'a> {
    rule: &'a DuplicateRule,
    editing: Option<&'a str>,
}

impl<'a> DuplicateDetector<'a> {
    pub fn new(rule: &'a DuplicateRule) -> Self {
        Self {
            rule,
            editing: None,
        }
    }

    /// Ignore the persisted record with this id (the record being edited).
    #[must_use]
    pub fn editing(mut self, id: Option<&'a str>) -> Self {
        self.editing = id;
        self
    }

    /// First record in `existing` that collides with `candidate`.
    pub fn check<C, E>(&self, candidate: &C, existing: &[E]) -> Option<DuplicateMatch>
    where
        C: FieldLookup,
        E: FieldLookup,
    {
        let identifier = normalized(candidate, &self.rule.identifier).unwrap_or_default();
        let secondary: Vec<(&Vec<String>, Vec<String>)> = self
            .rule
            .secondary
            .iter()
            .filter_map(|fields| folded_tuple(candidate, fields).map(|values| (fields, values)))
            .collect();

        for (position, other) in existing.iter().enumerate() {
            if let (Some(editing), Some(id)) = (self.editing, other.record_id())
                && editing.trim() == id.trim()
            {
                continue;
            }

            if !identifier.is_empty()
                && normalized(other, &self.rule.identifier).as_deref() == Some(identifier.as_str())
            {
                return Some(DuplicateMatch {
                    matched_by: MatchedBy::Identifier,
                    position,
                    existing_id: other.record_id().map(str::to_string),
                    identifier,
                });
            }

            for (fields, values) in &secondary {
                if folded_tuple(other, fields).as_ref() == Some(values) {
                    return Some(DuplicateMatch {
                        matched_by: MatchedBy::Fields((*fields).clone()),
                        position,
                        existing_id: other.record_id().map(str::to_string),
                        identifier,
                    });
                }
            }
        }
        None
    }

    /// Check each record against the records accepted before it in the same
    /// batch. Returns one error per duplicate row, reported against the
    /// identifying field.
    pub fn batch_duplicates(
        &self,
        spec: &RecordSpec,
        records: &[CommittableRecord],
    ) -> Vec<ValidationError> {
        let mut accepted: Vec<StoredRecord> = Vec::with_capacity(records.len());
        let mut accepted_rows: Vec<usize> = Vec::with_capacity(records.len());
        let mut errors = Vec::new();
        for record in records {
            match self.check(record, &accepted) {
                Some(found) => {
                    let earlier_row = accepted_rows[found.position];
                    errors.push(batch_error(spec, record.row, earlier_row, &found));
                }
                None => {
                    accepted.push(StoredRecord::from(record));
                    accepted_rows.push(record.row);
                }
            }
        }
        errors
    }
}

/// First record in `existing` that collides with `candidate` under `rule`,
/// skipping the record with id `editing`.
pub fn find_duplicate<C, E>(
    rule: &DuplicateRule,
    candidate: &C,
    existing: &[E],
    editing: Option<&str>,
) -> Option<DuplicateMatch>
where
    C: FieldLookup,
    E: FieldLookup,
{
    DuplicateDetector::new(rule)
        .editing(editing)
        .check(candidate, existing)
}

/// Error for a collision with the persisted collection.
pub fn existing_duplicate_error(
    spec: &RecordSpec,
    row: usize,
    found: &DuplicateMatch,
) -> ValidationError {
    let reference = match &found.existing_id {
        Some(id) => format!("an existing record (id {id})"),
        None => "an existing record".to_string(),
    };
    duplicate_error(spec, row, found, &reference)
}

fn batch_error(
    spec: &RecordSpec,
    row: usize,
    earlier_row: usize,
    found: &DuplicateMatch,
) -> ValidationError {
    duplicate_error(spec, row, found, &format!("row {earlier_row} of this file"))
}

fn duplicate_error(
    spec: &RecordSpec,
    row: usize,
    found: &DuplicateMatch,
    other: &str,
) -> ValidationError {
    let id_label = spec.label_for(&spec.duplicates.identifier);
    let message = match &found.matched_by {
        MatchedBy::Identifier => format!(
            "{id_label} '{}' is already used by {other}",
            found.identifier
        ),
        MatchedBy::Fields(fields) => {
            let labels: Vec<&str> = fields.iter().map(|f| spec.label_for(f)).collect();
            format!(
                "Same {} as {other}; this looks like a duplicate entry",
                labels.join(" and ")
            )
        }
    };
    ValidationError::new(row, id_label, ErrorKind::Duplicate, message)
}

fn normalized<R: FieldLookup + ?Sized>(record: &R, field: &str) -> Option<String> {
    record
        .lookup(field)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Case-folded values for every field in the tuple, or `None` if any is blank.
fn folded_tuple<R: FieldLookup + ?Sized>(record: &R, fields: &[String]) -> Option<Vec<String>> {
    fields
        .iter()
        .map(|field| normalized(record, field).map(|value| value.to_lowercase()))
        .collect()
}
