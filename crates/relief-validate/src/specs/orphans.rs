use relief_model::{
    DuplicateRule, EntityKind, FieldKind, FieldSpec, RecordSpec, ReferenceAttribute,
    ReferenceField, ReferenceSet,
};

use super::{age_from_birth_date, fields};

pub(super) fn spec() -> RecordSpec {
    let martyr = ReferenceField::new(ReferenceSet::Martyrs)
        .copying(ReferenceAttribute::Name, fields::MARTYR_NAME)
        .copying(ReferenceAttribute::Area, fields::AREA)
        .copying(ReferenceAttribute::DeathDate, fields::MARTYR_DEATH_DATE);

    RecordSpec {
        entity: EntityKind::Orphans,
        fields: vec![
            FieldSpec::required("Name", fields::NAME, FieldKind::Text),
            FieldSpec::required("National ID", fields::NATIONAL_ID, FieldKind::NationalId),
            FieldSpec::required("Birth Date", fields::BIRTH_DATE, FieldKind::Date),
            FieldSpec::optional("Gender", fields::GENDER, FieldKind::choice(["Male", "Female"])),
            FieldSpec::required(
                "Martyr National ID",
                fields::MARTYR_NATIONAL_ID,
                FieldKind::Reference(martyr),
            ),
            FieldSpec::optional("Guardian Name", fields::GUARDIAN_NAME, FieldKind::Text),
            FieldSpec::optional("Guardian Phone", fields::GUARDIAN_PHONE, FieldKind::Text),
            FieldSpec::optional("Siblings Count", "siblings_count", FieldKind::Count),
            FieldSpec::optional(
                "Education Level",
                "education_level",
                FieldKind::choice(["None", "Kindergarten", "Primary", "Secondary", "University"]),
            ),
        ],
        derived: vec![age_from_birth_date()],
        duplicates: DuplicateRule::by_identifier(fields::NATIONAL_ID)
            .or_matching(&[fields::NAME, fields::MARTYR_NATIONAL_ID]),
    }
}
