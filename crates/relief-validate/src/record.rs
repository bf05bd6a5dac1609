//! Row validation.
//!
//! Runs every declared field through [`validate_field`], resolves reference
//! columns, then fills in copied reference attributes and derived values.
//! A row yields either one committable record or its complete error list.

use chrono::NaiveDate;
use relief_model::{
    CellValue, CommittableRecord, DerivedField, ErrorKind, FieldKind, FieldSpec, RawRow, RecordSpec,
    ReferenceAttribute, ReferenceEntity, ReferenceField, ReferenceSet, TypedValue,
    ValidationError,
};

use crate::field::validate_field;
use crate::reference::{ReferenceSnapshot, Resolution, resolve};

/// Per-import inputs shared by every row.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    pub references: &'a ReferenceSnapshot,
    /// Reference date for derived ages. Ages are omitted without one.
    pub as_of: Option<NaiveDate>,
}

impl<'a> RowContext<'a> {
    pub fn new(references: &'a ReferenceSnapshot) -> Self {
        Self {
            references,
            as_of: None,
        }
    }

    #[must_use]
    pub fn as_of(mut self, date: Option<NaiveDate>) -> Self {
        self.as_of = date;
        self
    }
}

/// Validate one row. `row_number` is the row's position in the source file.
pub fn validate_row(
    spec: &RecordSpec,
    row: &RawRow,
    row_number: usize,
    context: &RowContext<'_>,
) -> Result<CommittableRecord, Vec<ValidationError>> {
    let mut record = CommittableRecord::new(row_number, spec.entity);
    let mut errors = Vec::new();
    let mut resolved: Vec<(&ReferenceField, &ReferenceEntity)> = Vec::new();
    let empty = CellValue::Empty;

    for field in &spec.fields {
        let cell = row.get(&field.label).unwrap_or(&empty);
        let value = match validate_field(field, cell) {
            Ok(Some(value)) => value,
            Ok(None) => continue,
            Err(failure) => {
                errors.push(ValidationError::new(
                    row_number,
                    &field.label,
                    failure.kind,
                    failure.message,
                ));
                continue;
            }
        };

        if let FieldKind::Reference(reference) = &field.kind {
            let key = value.render();
            match resolve_reference(field, reference, &key, context.references) {
                Ok(entity) => resolved.push((reference, entity)),
                Err((kind, message)) => {
                    errors.push(ValidationError::new(row_number, &field.label, kind, message));
                    continue;
                }
            }
        }
        record.insert(field.target.clone(), value);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // Columns supplied in the file take precedence over copied attributes.
    for (reference, entity) in resolved {
        for projection in &reference.copies {
            if let Some(value) = projected_value(entity, projection.attribute) {
                record
                    .fields
                    .entry(projection.target.clone())
                    .or_insert(value);
            }
        }
    }

    for derived in &spec.derived {
        apply_derived(&mut record, derived, context.as_of);
    }

    Ok(record)
}

fn resolve_reference<'a>(
    field: &FieldSpec,
    reference: &ReferenceField,
    key: &str,
    references: &'a ReferenceSnapshot,
) -> Result<&'a ReferenceEntity, (ErrorKind, String)> {
    let singular = reference.set.singular();
    let Some(index) = references.index(reference.set) else {
        return Err((
            ErrorKind::ReferenceNotFound,
            format!(
                "No {} records were provided, so {} '{key}' could not be checked",
                singular, field.label
            ),
        ));
    };
    match resolve(index, key, reference.eligibility) {
        Resolution::Found(entity) => Ok(entity),
        Resolution::NotFound => Err((
            ErrorKind::ReferenceNotFound,
            format!("No {singular} found with national ID '{key}'"),
        )),
        Resolution::Ineligible { entity, reason } => Err((
            ErrorKind::ReferenceIneligible,
            format!(
                "{} '{}' (national ID {}) was found but {reason}",
                title(reference.set),
                entity.name(),
                entity.national_id().trim()
            ),
        )),
    }
}

fn title(set: ReferenceSet) -> &'static str {
    match set {
        ReferenceSet::Guardians => "Guardian",
        ReferenceSet::Martyrs => "Martyr",
    }
}

/// Copied attribute as a typed value; dates stay dates.
fn projected_value(entity: &ReferenceEntity, attribute: ReferenceAttribute) -> Option<TypedValue> {
    if let (ReferenceEntity::Martyr(martyr), ReferenceAttribute::DeathDate) = (entity, attribute) {
        return martyr.death_date.map(TypedValue::Date);
    }
    entity
        .attribute(attribute)
        .map(|text| TypedValue::Text(text.trim().to_string()))
}

fn apply_derived(record: &mut CommittableRecord, derived: &DerivedField, as_of: Option<NaiveDate>) {
    match derived {
        DerivedField::AgeInYears { from, into } => {
            let Some(as_of) = as_of else {
                return;
            };
            let Some(born) = record.get(from).and_then(TypedValue::as_date) else {
                return;
            };
            if let Some(years) = as_of.years_since(born) {
                record.insert(into.clone(), TypedValue::Integer(u64::from(years)));
            }
        }
    }
}
