//! Built-in record specs, one per importable entity.

mod children;
mod medical;
mod orphans;
mod wives;

use relief_model::{DerivedField, EntityKind, RecordSpec};

/// Field names shared by several entity specs.
pub mod fields {
    pub const NAME: &str = "name";
    pub const NATIONAL_ID: &str = "national_id";
    pub const BIRTH_DATE: &str = "birth_date";
    pub const AGE: &str = "age";
    pub const GENDER: &str = "gender";
    pub const AREA: &str = "area";
    pub const PHONE: &str = "phone";
    pub const GUARDIAN_NATIONAL_ID: &str = "guardian_national_id";
    pub const GUARDIAN_NAME: &str = "guardian_name";
    pub const GUARDIAN_PHONE: &str = "guardian_phone";
    pub const MARTYR_NATIONAL_ID: &str = "martyr_national_id";
    pub const MARTYR_NAME: &str = "martyr_name";
    pub const MARTYR_DEATH_DATE: &str = "martyr_death_date";
    pub const HUSBAND_NATIONAL_ID: &str = "husband_national_id";
    pub const HUSBAND_NAME: &str = "husband_name";
    pub const HUSBAND_PHONE: &str = "husband_phone";
    pub const DIAGNOSIS: &str = "diagnosis";
}

/// Record spec for an entity type.
pub fn spec_for(entity: EntityKind) -> RecordSpec {
    match entity {
        EntityKind::Children => children::spec(),
        EntityKind::Orphans => orphans::spec(),
        EntityKind::Wives => wives::spec(),
        EntityKind::MedicalCases => medical::spec(),
    }
}

/// Every built-in spec, in [`EntityKind::ALL`] order.
pub fn all_specs() -> Vec<RecordSpec> {
    EntityKind::ALL.iter().copied().map(spec_for).collect()
}

fn age_from_birth_date() -> DerivedField {
    DerivedField::AgeInYears {
        from: fields::BIRTH_DATE.to_string(),
        into: fields::AGE.to_string(),
    }
}
