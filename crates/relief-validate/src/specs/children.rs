use relief_model::{
    DuplicateRule, Eligibility, EntityKind, FieldKind, FieldSpec, RecordSpec, ReferenceAttribute,
    ReferenceField, ReferenceSet,
};

use super::{age_from_birth_date, fields};

pub(super) fn spec() -> RecordSpec {
    let guardian = ReferenceField::new(ReferenceSet::Guardians)
        .requiring(Eligibility::HasDeclaredChildren)
        .copying(ReferenceAttribute::Name, fields::GUARDIAN_NAME)
        .copying(ReferenceAttribute::Area, fields::AREA)
        .copying(ReferenceAttribute::Phone, fields::GUARDIAN_PHONE);

    RecordSpec {
        entity: EntityKind::Children,
        fields: vec![
            FieldSpec::required("Name", fields::NAME, FieldKind::Text),
            FieldSpec::required("National ID", fields::NATIONAL_ID, FieldKind::NationalId),
            FieldSpec::required("Birth Date", fields::BIRTH_DATE, FieldKind::Date),
            FieldSpec::optional("Gender", fields::GENDER, FieldKind::choice(["Male", "Female"])),
            FieldSpec::required(
                "Guardian National ID",
                fields::GUARDIAN_NATIONAL_ID,
                FieldKind::Reference(guardian),
            ),
            FieldSpec::optional(
                "Health Status",
                "health_status",
                FieldKind::choice(["Healthy", "Chronic Illness", "Disability"]),
            ),
            FieldSpec::optional("Notes", "notes", FieldKind::Text),
        ],
        derived: vec![age_from_birth_date()],
        duplicates: DuplicateRule::by_identifier(fields::NATIONAL_ID)
            .or_matching(&[fields::NAME, fields::GUARDIAN_NATIONAL_ID]),
    }
}
