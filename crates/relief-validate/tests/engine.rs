//! Batch import behaviour across the built-in entity specs.

use chrono::NaiveDate;
use proptest::prelude::*;
use relief_model::{
    EntityKind, ErrorKind, Gender, Guardian, MaritalStatus, RawRow, ReferenceUpdate,
    StoredRecord, TypedValue,
};
use relief_validate::{
    DuplicateDetector, ImportBatch, MatchedBy, ReferenceSnapshot, fields, find_duplicate,
    post_commit_updates, run, spec_for,
};

fn guardian(national_id: &str, name: &str, children_count: u32) -> Guardian {
    Guardian {
        national_id: national_id.to_string(),
        name: name.to_string(),
        area: Some("Gaza City".to_string()),
        phone: Some("0599000000".to_string()),
        gender: Gender::Male,
        marital_status: MaritalStatus::Married,
        children_count,
        registered_children: 0,
        wives_count: 1,
    }
}

fn references() -> ReferenceSnapshot {
    let mut widow = guardian("300", "Huda", 2);
    widow.gender = Gender::Female;
    widow.marital_status = MaritalStatus::Widowed;
    ReferenceSnapshot::new().with_guardians(vec![
        guardian("100", "Mahmoud", 3),
        guardian("200", "Samir", 0),
        widow,
    ])
}

fn child(name: &str, national_id: &str, birth: &str, guardian: &str) -> RawRow {
    RawRow::new()
        .with("Name", name)
        .with("National ID", national_id)
        .with("Birth Date", birth)
        .with("Guardian National ID", guardian)
}

// --- Row validation tests ---

#[test]
fn missing_name_and_unknown_guardian_give_two_errors() {
    let spec = spec_for(EntityKind::Children);
    let references = references();
    let rows = vec![child("", "123", "2015-03-15", "X")];

    let outcome = run(&spec, &rows, &references);

    assert!(outcome.committable.is_empty());
    assert_eq!(outcome.errors.len(), 2);
    assert_eq!(outcome.errors[0].row, 2);
    assert_eq!(outcome.errors[0].field, "Name");
    assert_eq!(outcome.errors[0].kind, ErrorKind::Missing);
    assert_eq!(outcome.errors[1].field, "Guardian National ID");
    assert_eq!(outcome.errors[1].kind, ErrorKind::ReferenceNotFound);
    assert_eq!(
        outcome.errors[1].message,
        "No guardian found with national ID 'X'"
    );
}

#[test]
fn impossible_month_gives_single_date_error() {
    let spec = spec_for(EntityKind::Children);
    let references = references();
    let rows = vec![child("Omar", "123", "31/13/2020", "100")];

    let outcome = run(&spec, &rows, &references);

    assert_eq!(outcome.errors.len(), 1);
    let error = &outcome.errors[0];
    assert_eq!(error.field, "Birth Date");
    assert_eq!(error.kind, ErrorKind::InvalidDate);
    assert!(error.message.contains("31/13/2020"));
}

#[test]
fn valid_child_copies_guardian_details() {
    let spec = spec_for(EntityKind::Children);
    let references = references();
    let rows = vec![child("Omar", "123", "15/3/2015", "100").with("Gender", "Male")];

    let outcome = ImportBatch::new(&spec, &references)
        .as_of(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())
        .run(&rows);

    assert!(outcome.errors.is_empty());
    let record = &outcome.committable[0];
    assert_eq!(record.row, 2);
    assert_eq!(record.text(fields::GUARDIAN_NAME), Some("Mahmoud"));
    assert_eq!(record.text(fields::AREA), Some("Gaza City"));
    assert_eq!(record.text(fields::GUARDIAN_PHONE), Some("0599000000"));
    assert_eq!(record.get(fields::AGE), Some(&TypedValue::Integer(10)));
    assert_eq!(
        record.get(fields::BIRTH_DATE),
        Some(&TypedValue::Date(NaiveDate::from_ymd_opt(2015, 3, 15).unwrap()))
    );
}

#[test]
fn every_field_error_is_collected() {
    let spec = spec_for(EntityKind::MedicalCases);
    let references = references();
    let rows = vec![
        RawRow::new()
            .with("Name", "Rana")
            .with("Case Type", "injury")
            .with("Severity", "mild")
            .with("Birth Date", "yesterday"),
    ];

    let outcome = run(&spec, &rows, &references);
    let fields: Vec<&str> = outcome.errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(
        fields,
        vec!["National ID", "Birth Date", "Case Type", "Diagnosis", "Severity"]
    );
}

// --- Reference eligibility tests ---

#[test]
fn guardian_without_children_is_ineligible() {
    let spec = spec_for(EntityKind::Children);
    let references = references();
    let rows = vec![child("Omar", "123", "2015-03-15", "200")];

    let outcome = run(&spec, &rows, &references);

    assert_eq!(outcome.errors.len(), 1);
    let error = &outcome.errors[0];
    assert_eq!(error.kind, ErrorKind::ReferenceIneligible);
    assert!(error.message.contains("Samir"), "{}", error.message);
    assert!(error.message.contains("children count is 0"), "{}", error.message);
}

#[test]
fn wife_needs_married_male_husband() {
    let spec = spec_for(EntityKind::Wives);
    let references = references();
    let rows = vec![
        RawRow::new()
            .with("Name", "Amal")
            .with("National ID", "700")
            .with("Husband National ID", "300"),
        RawRow::new()
            .with("Name", "Noor")
            .with("National ID", "701")
            .with("Husband National ID", "100"),
    ];

    let outcome = run(&spec, &rows, &references);

    assert_eq!(outcome.errors.len(), 1);
    let error = &outcome.errors[0];
    assert_eq!(error.row, 2);
    assert_eq!(error.kind, ErrorKind::ReferenceIneligible);
    assert!(error.message.starts_with("Guardian 'Huda' (national ID 300) was found but"));
    assert!(error.message.contains("is not male"));
    assert!(error.message.contains("is not currently married"));

    assert_eq!(outcome.committable.len(), 1);
    assert_eq!(
        outcome.committable[0].text(fields::HUSBAND_NAME),
        Some("Mahmoud")
    );
}

#[test]
fn optional_reference_may_be_blank() {
    let spec = spec_for(EntityKind::MedicalCases);
    let references = ReferenceSnapshot::new();
    let rows = vec![
        RawRow::new()
            .with("Name", "Rana")
            .with("National ID", "800")
            .with("Case Type", "War Injury")
            .with("Diagnosis", "Fracture"),
    ];

    let outcome = run(&spec, &rows, &references);
    assert!(outcome.errors.is_empty());
    assert!(outcome.committable[0].get(fields::GUARDIAN_NAME).is_none());
}

// --- Duplicate tests ---

#[test]
fn identical_ids_in_one_file_pass_individually() {
    let spec = spec_for(EntityKind::Children);
    let references = references();
    let rows = vec![
        child("Omar", "123", "2015-03-15", "100"),
        child("Ali", "123", "2016-01-01", "100"),
    ];

    let outcome = run(&spec, &rows, &references);
    assert_eq!(outcome.committable.len(), 2);

    let detector = DuplicateDetector::new(&spec.duplicates);
    let errors = detector.batch_duplicates(&spec, &outcome.committable);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].row, 3);
    assert_eq!(errors[0].field, "National ID");
    assert_eq!(errors[0].kind, ErrorKind::Duplicate);
    assert!(errors[0].message.contains("row 2"));

    let mut outcome = outcome;
    outcome.reject(errors);
    assert_eq!(outcome.committable.len(), 1);
    assert!(outcome.is_fully_accounted());
}

#[test]
fn second_row_is_duplicate_once_first_exists() {
    let spec = spec_for(EntityKind::Children);
    let references = references();
    let first = vec![child("Omar", "123", "2015-03-15", "100")];
    let accepted = run(&spec, &first, &references);
    let existing: Vec<StoredRecord> = accepted
        .committable
        .iter()
        .map(StoredRecord::from)
        .collect();

    let second = vec![child("Ali", "123", "2016-01-01", "100")];
    let outcome = ImportBatch::new(&spec, &references)
        .with_existing(&existing)
        .run(&second);

    assert!(outcome.committable.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].field, "National ID");
    assert_eq!(outcome.errors[0].kind, ErrorKind::Duplicate);
}

#[test]
fn find_duplicate_matches_identifier_and_skips_edited_record() {
    let spec = spec_for(EntityKind::Children);
    let references = references();
    let rows = vec![
        child("Omar", "123", "2015-03-15", "100"),
        child("Ali", "123", "2016-01-01", "100"),
    ];
    let outcome = run(&spec, &rows, &references);
    let existing = vec![StoredRecord::from(&outcome.committable[0])];

    let found = find_duplicate(&spec.duplicates, &outcome.committable[1], &existing, None)
        .expect("same national ID");
    assert_eq!(found.matched_by, MatchedBy::Identifier);
    assert_eq!(found.position, 0);
    assert_eq!(found.identifier, "123");

    let editing = vec![StoredRecord::new(Some("c-9")).with(fields::NATIONAL_ID, "123")];
    assert!(
        find_duplicate(
            &spec.duplicates,
            &outcome.committable[1],
            &editing,
            Some("c-9")
        )
        .is_none()
    );
}

#[test]
fn secondary_tuple_catches_retyped_child() {
    let spec = spec_for(EntityKind::Children);
    let references = references();
    let existing = vec![
        StoredRecord::new(Some("c-1"))
            .with(fields::NATIONAL_ID, "999")
            .with(fields::NAME, "omar")
            .with(fields::GUARDIAN_NATIONAL_ID, "100"),
    ];
    let rows = vec![child("OMAR", "123", "2015-03-15", "100")];

    let outcome = ImportBatch::new(&spec, &references)
        .with_existing(&existing)
        .run(&rows);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].message.contains("id c-1"));

    let editing = ImportBatch::new(&spec, &references)
        .with_existing(&existing)
        .editing("c-1")
        .run(&rows);
    assert!(editing.errors.is_empty());
}

#[test]
fn duplicates_only_checked_on_valid_rows() {
    let spec = spec_for(EntityKind::Children);
    let references = references();
    let existing = vec![StoredRecord::new(None).with(fields::NATIONAL_ID, "123")];
    let rows = vec![child("Omar", "123", "not a date", "100")];

    let outcome = ImportBatch::new(&spec, &references)
        .with_existing(&existing)
        .run(&rows);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].kind, ErrorKind::InvalidDate);
}

// --- Post-commit tests ---

#[test]
fn child_commit_increments_registered_children() {
    let spec = spec_for(EntityKind::Children);
    let references = references();
    let outcome = run(&spec, &[child("Omar", "123", "2015-03-15", "100")], &references);

    let updates = post_commit_updates(&outcome.committable[0]);
    assert_eq!(
        updates,
        vec![ReferenceUpdate::IncrementRegisteredChildren {
            guardian_national_id: "100".to_string()
        }]
    );

    let mut guardians = vec![guardian("100", "Mahmoud", 3)];
    assert!(updates[0].apply(&mut guardians));
    assert_eq!(guardians[0].registered_children, 1);
}

// --- Batch properties ---

#[test]
fn pinned_source_rows_number_records_and_errors() {
    let spec = spec_for(EntityKind::Children);
    let references = references();
    let rows = vec![
        child("Omar", "123", "2015-03-15", "100").at_source_row(2),
        child("", "124", "2015-03-15", "100").at_source_row(5),
        child("Ali", "125", "2016-01-01", "100"),
    ];

    let outcome = run(&spec, &rows, &references);

    assert_eq!(outcome.committable[0].row, 2);
    assert_eq!(outcome.errors[0].row, 5);
    assert_eq!(outcome.committable[1].row, 4);
    assert!(outcome.is_fully_accounted());
}

#[test]
fn committable_records_keep_input_order() {
    let spec = spec_for(EntityKind::Children);
    let references = references();
    let rows = vec![
        child("A", "1", "2015-03-15", "100"),
        child("", "2", "2015-03-15", "100"),
        child("C", "3", "2015-03-15", "100"),
        child("D", "4", "2015-03-15", "100"),
    ];

    let outcome = run(&spec, &rows, &references);
    let rows: Vec<usize> = outcome.committable.iter().map(|r| r.row).collect();
    assert_eq!(rows, vec![2, 4, 5]);
    assert_eq!(outcome.rejected_rows().into_iter().collect::<Vec<_>>(), vec![3]);
}

fn arbitrary_child() -> impl Strategy<Value = RawRow> {
    (
        prop_oneof![Just(""), Just("Omar"), Just("Sara")],
        prop_oneof![Just(""), Just("123"), Just("456")],
        prop_oneof![Just("2015-03-15"), Just("31/13/2020"), Just(""), Just("42078")],
        prop_oneof![Just("100"), Just("200"), Just("X"), Just("")],
        prop_oneof![Just(""), Just("Male"), Just("male")],
    )
        .prop_map(|(name, id, birth, guardian, gender)| {
            child(name, id, birth, guardian).with("Gender", gender)
        })
}

proptest! {
    #[test]
    fn every_row_is_accounted_for(rows in prop::collection::vec(arbitrary_child(), 0..20)) {
        let spec = spec_for(EntityKind::Children);
        let references = references();
        let outcome = run(&spec, &rows, &references);

        prop_assert_eq!(outcome.total_rows, rows.len());
        prop_assert!(outcome.is_fully_accounted());
        for record in &outcome.committable {
            prop_assert!(outcome.errors_for_row(record.row).next().is_none());
        }
    }
}
