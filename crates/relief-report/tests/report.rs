use relief_model::{ErrorKind, ValidationError};
use relief_report::{
    CSV_HEADERS, ErrorCategory, ErrorReport, ReportFormat, write_csv, write_json, write_report,
};
use tempfile::TempDir;

fn errors() -> Vec<ValidationError> {
    vec![
        ValidationError::new(2, "Name", ErrorKind::Missing, "Name is required"),
        ValidationError::new(
            2,
            "Guardian National ID",
            ErrorKind::ReferenceNotFound,
            "No guardian found with national ID 'X'",
        ),
        ValidationError::new(
            4,
            "Birth Date",
            ErrorKind::InvalidDate,
            "Could not read '31/13/2020' as a date for Birth Date",
        ),
        ValidationError::new(5, "National ID", ErrorKind::Duplicate, "already used"),
    ]
}

// --- Build tests ---

#[test]
fn lines_are_numbered_in_error_order() {
    let report = ErrorReport::build(&errors());
    let numbers: Vec<(usize, usize)> = report.lines.iter().map(|l| (l.number, l.row)).collect();
    assert_eq!(numbers, vec![(1, 2), (2, 2), (3, 4), (4, 5)]);
    assert_eq!(report.lines[1].category, ErrorCategory::Reference);
    assert_eq!(report.affected_rows(), 3);
}

#[test]
fn counts_include_every_category() {
    let report = ErrorReport::build(&errors());
    let counts: Vec<(ErrorCategory, usize)> = report.counts().collect();
    assert_eq!(
        counts,
        vec![
            (ErrorCategory::Date, 1),
            (ErrorCategory::Reference, 1),
            (ErrorCategory::Choice, 0),
            (ErrorCategory::Generic, 2),
        ]
    );
}

#[test]
fn common_fixes_do_not_depend_on_errors() {
    let empty = ErrorReport::build(&[]);
    assert!(empty.is_empty());
    assert_eq!(ErrorReport::common_fixes().len(), 4);
    assert_eq!(empty.count(ErrorCategory::Date), 0);
}

// --- Export tests ---

#[test]
fn csv_has_error_table_then_fixes() {
    let report = ErrorReport::build(&errors());
    let mut buffer = Vec::new();
    write_csv(&report, &mut buffer).expect("write csv");
    let text = String::from_utf8(buffer).expect("utf8");
    let mut lines = text.lines();

    assert_eq!(lines.next(), Some(CSV_HEADERS.join(",").as_str()));
    assert_eq!(lines.next(), Some("1,2,Name,Name is required,Other"));
    assert!(text.contains("Category,Common fix"));
    assert!(text.contains("Allowed values,"));
}

#[test]
fn json_report_carries_schema_and_counts() {
    let report = ErrorReport::build(&errors());
    let mut buffer = Vec::new();
    write_json(&report, &mut buffer).expect("write json");
    let value: serde_json::Value = serde_json::from_slice(&buffer).expect("parse json");

    assert_eq!(value["schema"], "relief-import.error-report");
    assert_eq!(value["total_errors"], 4);
    assert_eq!(value["errors"][2]["category"], "date");
    assert_eq!(value["errors"][2]["row"], 4);
    assert_eq!(value["counts"][3]["count"], 2);
    assert_eq!(value["common_fixes"].as_array().map(Vec::len), Some(4));
}

#[test]
fn writes_report_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("errors.csv");
    let format: ReportFormat = "CSV".parse().expect("format");

    write_report(&ErrorReport::build(&errors()), &path, format).expect("write report");
    let written = std::fs::read_to_string(&path).expect("read report");
    assert!(written.starts_with("Error #,Row #,Field,Message,Category"));

    assert!("xlsx".parse::<ReportFormat>().is_err());
}
