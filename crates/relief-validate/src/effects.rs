//! Post-commit reference updates.
//!
//! Creating some records changes counters on the referenced guardian. The
//! engine never applies these itself; the caller applies them to its own
//! collection once a record has actually been stored.

use relief_model::{CommittableRecord, EntityKind, ReferenceUpdate};

use crate::specs::fields;

/// Updates owed for one successfully created record.
pub fn post_commit_updates(record: &CommittableRecord) -> Vec<ReferenceUpdate> {
    let guardian = |field: &str| {
        record
            .text(field)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    };
    match record.entity {
        EntityKind::Children => guardian(fields::GUARDIAN_NATIONAL_ID)
            .map(|guardian_national_id| ReferenceUpdate::IncrementRegisteredChildren {
                guardian_national_id,
            })
            .into_iter()
            .collect(),
        EntityKind::Wives => guardian(fields::HUSBAND_NATIONAL_ID)
            .map(|guardian_national_id| ReferenceUpdate::IncrementWives {
                guardian_national_id,
            })
            .into_iter()
            .collect(),
        EntityKind::Orphans | EntityKind::MedicalCases => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_model::TypedValue;

    #[test]
    fn wife_increments_husband() {
        let mut record = CommittableRecord::new(2, EntityKind::Wives);
        record.insert(
            fields::HUSBAND_NATIONAL_ID,
            TypedValue::Text("200".to_string()),
        );
        assert_eq!(
            post_commit_updates(&record),
            vec![ReferenceUpdate::IncrementWives {
                guardian_national_id: "200".to_string()
            }]
        );
    }

    #[test]
    fn medical_case_with_guardian_owes_nothing() {
        let mut record = CommittableRecord::new(2, EntityKind::MedicalCases);
        record.insert(
            fields::GUARDIAN_NATIONAL_ID,
            TypedValue::Text("200".to_string()),
        );
        assert!(post_commit_updates(&record).is_empty());
    }
}
