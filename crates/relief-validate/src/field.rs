//! Single-field validation.
//!
//! Checks one cell against its [`FieldSpec`]: required-ness, choice
//! membership, whole-number ranges and date readability. Reference columns
//! are validated as national IDs here and resolved by the record validator.

use relief_model::{CellValue, ErrorKind, FieldKind, FieldSpec, TypedValue};
use relief_transform::{ACCEPTED_FORMAT_EXAMPLE, normalize_cell, parse_count};

/// A field-level failure before it is tied to a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    fn new(kind: ErrorKind, message: String) -> Self {
        Self { kind, message }
    }
}

/// Validate one cell. `Ok(None)` means an optional field was left empty.
pub(crate) fn validate_field(
    spec: &FieldSpec,
    cell: &CellValue,
) -> Result<Option<TypedValue>, FieldError> {
    if cell.is_blank() {
        if spec.required {
            return Err(FieldError::new(
                ErrorKind::Missing,
                format!("{} is required", spec.label),
            ));
        }
        return Ok(None);
    }

    let raw = cell.display_text();
    match &spec.kind {
        FieldKind::Text | FieldKind::NationalId | FieldKind::Reference(_) => {
            Ok(Some(TypedValue::Text(raw)))
        }
        FieldKind::Choice { options } => {
            if options.iter().any(|option| option == &raw) {
                Ok(Some(TypedValue::Text(raw)))
            } else {
                Err(FieldError::new(
                    ErrorKind::InvalidChoice,
                    format!(
                        "'{raw}' is not a valid {}; expected one of: {}",
                        spec.label,
                        options.join(", ")
                    ),
                ))
            }
        }
        FieldKind::Count => parse_count(cell)
            .map(|value| Some(TypedValue::Integer(value)))
            .map_err(|reason| {
                FieldError::new(
                    ErrorKind::InvalidNumber,
                    format!("{} {reason}: '{raw}'", spec.label),
                )
            }),
        FieldKind::Date => match normalize_cell(cell) {
            Some(date) => Ok(Some(TypedValue::Date(date))),
            None => Err(FieldError::new(
                ErrorKind::InvalidDate,
                format!(
                    "Could not read '{raw}' as a date for {}; use a format such as {ACCEPTED_FORMAT_EXAMPLE}",
                    spec.label
                ),
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn choice() -> FieldSpec {
        FieldSpec::required("Gender", "gender", FieldKind::choice(["Male", "Female"]))
    }

    #[test]
    fn required_blank_cites_label() {
        let spec = FieldSpec::required("Name", "name", FieldKind::Text);
        let err = validate_field(&spec, &CellValue::text("   ")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Missing);
        assert_eq!(err.message, "Name is required");
    }

    #[test]
    fn optional_blank_is_absent() {
        let spec = FieldSpec::optional("Notes", "notes", FieldKind::Text);
        assert_eq!(validate_field(&spec, &CellValue::Empty), Ok(None));
    }

    #[test]
    fn text_is_trimmed() {
        let spec = FieldSpec::required("National ID", "national_id", FieldKind::NationalId);
        assert_eq!(
            validate_field(&spec, &CellValue::text("  4001 ")),
            Ok(Some(TypedValue::Text("4001".to_string())))
        );
        assert_eq!(
            validate_field(&spec, &CellValue::Number(4001.0)),
            Ok(Some(TypedValue::Text("4001".to_string())))
        );
    }

    #[test]
    fn choice_is_case_sensitive_and_lists_options() {
        assert_eq!(
            validate_field(&choice(), &CellValue::text(" Female ")),
            Ok(Some(TypedValue::Text("Female".to_string())))
        );
        let err = validate_field(&choice(), &CellValue::text("female")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidChoice);
        assert!(err.message.contains("Male, Female"));
        assert!(err.message.contains("'female'"));
    }

    #[test]
    fn count_rejects_negative() {
        let spec = FieldSpec::optional("Siblings Count", "siblings_count", FieldKind::Count);
        let err = validate_field(&spec, &CellValue::text("-2")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidNumber);
        assert_eq!(err.message, "Siblings Count cannot be negative: '-2'");
        assert_eq!(
            validate_field(&spec, &CellValue::text("4")),
            Ok(Some(TypedValue::Integer(4)))
        );
    }

    #[test]
    fn date_failure_quotes_raw_value_and_example() {
        let spec = FieldSpec::required("Birth Date", "birth_date", FieldKind::Date);
        let err = validate_field(&spec, &CellValue::text("31/13/2020")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidDate);
        assert!(err.message.contains("'31/13/2020'"));
        assert!(err.message.contains(ACCEPTED_FORMAT_EXAMPLE));

        assert_eq!(
            validate_field(&spec, &CellValue::text("15.3.2015")),
            Ok(Some(TypedValue::Date(
                NaiveDate::from_ymd_opt(2015, 3, 15).unwrap()
            )))
        );
    }
}
