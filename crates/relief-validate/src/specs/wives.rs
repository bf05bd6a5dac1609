use relief_model::{
    DuplicateRule, Eligibility, EntityKind, FieldKind, FieldSpec, RecordSpec, ReferenceAttribute,
    ReferenceField, ReferenceSet,
};

use super::{age_from_birth_date, fields};

pub(super) fn spec() -> RecordSpec {
    let husband = ReferenceField::new(ReferenceSet::Guardians)
        .requiring(Eligibility::MarriedMale)
        .copying(ReferenceAttribute::Name, fields::HUSBAND_NAME)
        .copying(ReferenceAttribute::Area, fields::AREA)
        .copying(ReferenceAttribute::Phone, fields::HUSBAND_PHONE);

    RecordSpec {
        entity: EntityKind::Wives,
        fields: vec![
            FieldSpec::required("Name", fields::NAME, FieldKind::Text),
            FieldSpec::required("National ID", fields::NATIONAL_ID, FieldKind::NationalId),
            FieldSpec::optional("Birth Date", fields::BIRTH_DATE, FieldKind::Date),
            FieldSpec::required(
                "Husband National ID",
                fields::HUSBAND_NATIONAL_ID,
                FieldKind::Reference(husband),
            ),
            FieldSpec::optional("Phone", fields::PHONE, FieldKind::Text),
            FieldSpec::optional("Pregnant", "pregnant", FieldKind::choice(["Yes", "No"])),
            FieldSpec::optional("Children Count", "children_count", FieldKind::Count),
        ],
        derived: vec![age_from_birth_date()],
        duplicates: DuplicateRule::by_identifier(fields::NATIONAL_ID),
    }
}
