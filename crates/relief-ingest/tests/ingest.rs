use std::fs;
use std::path::PathBuf;

use relief_ingest::{
    IngestError, RowFormat, check_headers, load_existing, load_guardians, read_bytes_with_limit,
    read_rows,
};
use relief_model::{
    CellValue, DuplicateRule, EntityKind, FieldKind, FieldLookup, FieldSpec, Gender,
    MaritalStatus, RecordSpec,
};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn spec() -> RecordSpec {
    RecordSpec {
        entity: EntityKind::Wives,
        fields: vec![
            FieldSpec::required("Name", "name", FieldKind::Text),
            FieldSpec::required("National ID", "national_id", FieldKind::NationalId),
            FieldSpec::optional("Phone", "phone", FieldKind::Text),
        ],
        derived: Vec::new(),
        duplicates: DuplicateRule::by_identifier("national_id"),
    }
}

// --- CSV tests ---

#[test]
fn reads_csv_rows_as_text() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        &dir,
        "wives.csv",
        b"\xEF\xBB\xBFName, National ID ,Birth Date\nAmal,700,15/3/1990\nNoor,701\n",
    );

    let rows = read_rows(&path).expect("read csv");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("Name"), Some(&CellValue::text("Amal")));
    assert_eq!(rows[0].get("National ID"), Some(&CellValue::text("700")));
    assert_eq!(rows[0].get("Birth Date"), Some(&CellValue::text("15/3/1990")));
    assert_eq!(rows[1].get("Birth Date"), Some(&CellValue::Empty));
}

#[test]
fn blank_lines_keep_later_rows_on_their_file_line() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "rows.csv", b"Name,National ID\nA,1\n\nC,3\n");

    let rows = read_rows(&path).expect("read csv");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].source_row(), Some(2));
    assert_eq!(rows[1].get("Name"), Some(&CellValue::text("C")));
    assert_eq!(rows[1].source_row(), Some(4));
}

#[test]
fn quoted_cells_keep_delimiters() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "rows.csv", b"Name,Notes\n\"Ali, Jr\",\"line one\"\n");

    let rows = read_rows(&path).expect("read csv");
    assert_eq!(rows[0].get("Name"), Some(&CellValue::text("Ali, Jr")));
}

#[test]
fn empty_header_cell_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "rows.csv", b"Name,,Phone\nAmal,x,1\n");

    let err = read_rows(&path).unwrap_err();
    assert!(matches!(err, IngestError::EmptyColumnName { index: 2, .. }));
}

#[test]
fn utf16_files_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "rows.csv", &[0xFF, 0xFE, b'N', 0, b'a', 0]);

    let err = read_rows(&path).unwrap_err();
    assert!(matches!(
        err,
        IngestError::UnsupportedEncoding {
            encoding: "UTF-16 LE",
            ..
        }
    ));
}

#[test]
fn oversized_files_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "rows.csv", b"Name\nAmal\n");

    let err = read_bytes_with_limit(&path, 4).unwrap_err();
    assert!(matches!(err, IngestError::FileTooLarge { max_size: 4, .. }));
}

// --- JSON tests ---

#[test]
fn reads_json_rows_with_typed_cells() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        &dir,
        "rows.JSON",
        br#"[{"Name": "Amal", "Birth Date": 42078, "Phone": null}]"#,
    );

    let rows = read_rows(&path).expect("read json");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("Birth Date"), Some(&CellValue::Number(42078.0)));
    assert_eq!(rows[0].get("Phone"), Some(&CellValue::Empty));
    let labels: Vec<&str> = rows[0].labels().collect();
    assert_eq!(labels, vec!["Name", "Birth Date", "Phone"]);
}

#[test]
fn json_rows_have_no_source_row() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "rows.json", br#"[{"Name": "Amal"}]"#);

    let rows = read_rows(&path).expect("read json");
    assert_eq!(rows[0].source_row(), None);
}

#[test]
fn long_integer_ids_keep_every_digit() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        &dir,
        "rows.json",
        br#"[{"National ID": 12345678901234567, "Count": 3}]"#,
    );

    let rows = read_rows(&path).expect("read json");
    assert_eq!(
        rows[0].get("National ID"),
        Some(&CellValue::text("12345678901234567"))
    );
    assert_eq!(rows[0].get("Count"), Some(&CellValue::Number(3.0)));
}

#[test]
fn json_top_level_must_be_an_array() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "rows.json", br#"{"Name": "Amal"}"#);

    let err = read_rows(&path).unwrap_err();
    assert!(matches!(err, IngestError::NotAnArray { .. }));
    assert!(err.to_string().starts_with("expected a JSON array"));
}

#[test]
fn nested_json_values_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "rows.json", br#"[{"Name": "Amal"}, {"Name": ["x"]}]"#);

    let err = read_rows(&path).unwrap_err();
    assert!(matches!(err, IngestError::InvalidJsonRow { index: 2, .. }));
}

#[test]
fn unknown_extension_and_missing_file() {
    assert!(matches!(
        RowFormat::from_path(std::path::Path::new("rows.xlsx")),
        Err(IngestError::UnsupportedFormat { .. })
    ));

    let dir = TempDir::new().expect("temp dir");
    let err = read_rows(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

// --- Reference collection tests ---

#[test]
fn loads_guardians_and_existing_records() {
    let dir = TempDir::new().expect("temp dir");
    let guardians = write(
        &dir,
        "guardians.json",
        br#"[{"national_id": "100", "name": "Mahmoud", "gender": "Male",
              "marital_status": "Married", "children_count": 3}]"#,
    );
    let existing = write(
        &dir,
        "existing.json",
        br#"[{"id": "w-1", "fields": {"national_id": "700"}}, {"fields": {"national_id": "701"}}]"#,
    );

    let guardians = load_guardians(&guardians).expect("load guardians");
    assert_eq!(guardians[0].marital_status, MaritalStatus::Married);
    assert_eq!(guardians[0].wives_count, 0);

    let existing = load_existing(&existing).expect("load existing");
    assert_eq!(existing[0].record_id(), Some("w-1"));
    assert_eq!(existing[1].lookup("national_id").as_deref(), Some("701"));
}

#[test]
fn guardian_enums_accept_lowercase_spellings() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        &dir,
        "guardians.json",
        br#"[{"national_id": "100", "name": "Mahmoud", "gender": "male",
              "marital_status": "married", "children_count": 2}]"#,
    );

    let guardians = load_guardians(&path).expect("load guardians");
    assert_eq!(guardians[0].gender, Gender::Male);
    assert_eq!(guardians[0].marital_status, MaritalStatus::Married);
}

#[test]
fn malformed_reference_json_is_fatal() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "guardians.json", b"[{\"national_id\": 5}]");
    assert!(matches!(
        load_guardians(&path),
        Err(IngestError::JsonParse { .. })
    ));
}

// --- Header tests ---

#[test]
fn header_check_reports_missing_and_unknown() {
    let check = check_headers(&spec(), [" Name ", "Phone number", "Phone"]);
    assert_eq!(check.missing_required, vec!["National ID".to_string()]);
    assert!(check.missing_optional.is_empty());
    assert_eq!(check.unknown, vec!["Phone number".to_string()]);
    assert!(!check.is_clean());

    assert!(check_headers(&spec(), ["Name", "National ID", "Phone"]).is_clean());
}
