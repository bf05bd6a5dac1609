//! Error reports for beneficiary imports.
//!
//! Turns the engine's error list into a numbered, row-addressable report with
//! per-category counts and standing advice, exportable as CSV or JSON.

mod category;
mod error;
mod export;
mod report;

pub use category::ErrorCategory;
pub use error::{ReportError, Result};
pub use export::{
    CSV_HEADERS, REPORT_SCHEMA, REPORT_SCHEMA_VERSION, ReportFormat, write_csv, write_json,
    write_report,
};
pub use report::{CommonFix, ErrorReport, ReportLine};
