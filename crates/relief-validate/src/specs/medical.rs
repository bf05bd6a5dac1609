use relief_model::{
    DuplicateRule, EntityKind, FieldKind, FieldSpec, RecordSpec, ReferenceAttribute,
    ReferenceField, ReferenceSet,
};

use super::{age_from_birth_date, fields};

pub(super) fn spec() -> RecordSpec {
    // Optional: a medical case need not belong to a registered family.
    let guardian = ReferenceField::new(ReferenceSet::Guardians)
        .copying(ReferenceAttribute::Name, fields::GUARDIAN_NAME)
        .copying(ReferenceAttribute::Area, fields::AREA);

    RecordSpec {
        entity: EntityKind::MedicalCases,
        fields: vec![
            FieldSpec::required("Name", fields::NAME, FieldKind::Text),
            FieldSpec::required("National ID", fields::NATIONAL_ID, FieldKind::NationalId),
            FieldSpec::optional("Birth Date", fields::BIRTH_DATE, FieldKind::Date),
            FieldSpec::required(
                "Case Type",
                "case_type",
                FieldKind::choice([
                    "Chronic Disease",
                    "Disability",
                    "War Injury",
                    "Malnutrition",
                    "Other",
                ]),
            ),
            FieldSpec::required("Diagnosis", fields::DIAGNOSIS, FieldKind::Text),
            FieldSpec::optional(
                "Severity",
                "severity",
                FieldKind::choice(["Mild", "Moderate", "Severe", "Critical"]),
            ),
            FieldSpec::optional(
                "Guardian National ID",
                fields::GUARDIAN_NATIONAL_ID,
                FieldKind::Reference(guardian),
            ),
            FieldSpec::optional("Phone", fields::PHONE, FieldKind::Text),
            FieldSpec::optional("Needs", "needs", FieldKind::Text),
        ],
        derived: vec![age_from_birth_date()],
        duplicates: DuplicateRule::by_identifier(fields::NATIONAL_ID)
            .or_matching(&[fields::NAME, fields::DIAGNOSIS]),
    }
}
