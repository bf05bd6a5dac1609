//! CSV and JSON report files.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::category::ErrorCategory;
use crate::error::{ReportError, Result};
use crate::report::{CommonFix, ErrorReport, ReportLine};

/// Identifies the JSON layout for consumers.
pub const REPORT_SCHEMA: &str = "relief-import.error-report";
pub const REPORT_SCHEMA_VERSION: u32 = 1;

pub const CSV_HEADERS: [&str; 5] = ["Error #", "Row #", "Field", "Message", "Category"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            _ => Err(ReportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Write the error table, then a blank line and the common-fixes section.
pub fn write_csv<W: Write>(report: &ErrorReport, writer: W) -> Result<()> {
    let mut csv = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    csv.write_record(CSV_HEADERS)?;
    for line in &report.lines {
        csv.write_record([
            line.number.to_string(),
            line.row.to_string(),
            line.field.clone(),
            line.message.clone(),
            line.category.label().to_string(),
        ])?;
    }

    csv.write_record([""])?;
    csv.write_record(["Category", "Common fix"])?;
    for fix in ErrorReport::common_fixes() {
        csv.write_record([fix.category.label(), fix.advice])?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[derive(Serialize)]
struct ReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    total_errors: usize,
    affected_rows: usize,
    counts: Vec<CategoryCount>,
    errors: &'a [ReportLine],
    common_fixes: Vec<CommonFix>,
}

#[derive(Serialize)]
struct CategoryCount {
    category: ErrorCategory,
    count: usize,
}

pub fn write_json<W: Write>(report: &ErrorReport, mut writer: W) -> Result<()> {
    let payload = ReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        total_errors: report.total(),
        affected_rows: report.affected_rows(),
        counts: report
            .counts()
            .map(|(category, count)| CategoryCount { category, count })
            .collect(),
        errors: &report.lines,
        common_fixes: ErrorReport::common_fixes(),
    };
    serde_json::to_writer_pretty(&mut writer, &payload)?;
    writeln!(writer).map_err(serde_json::Error::io)?;
    Ok(())
}

/// Write the report to `path` in the given format.
pub fn write_report(report: &ErrorReport, path: &Path, format: ReportFormat) -> Result<()> {
    let io_error = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    match format {
        ReportFormat::Csv => write_csv(report, &mut writer)?,
        ReportFormat::Json => write_json(report, &mut writer)?,
    }
    writer.flush().map_err(io_error)?;
    Ok(())
}
