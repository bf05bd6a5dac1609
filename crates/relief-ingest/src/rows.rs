//! Spreadsheet rows from CSV and JSON exports.
//!
//! Every cell read from CSV is text; typing happens in the engine. JSON
//! exports keep numbers as numbers so date serials survive.

use std::path::Path;

use relief_model::{CellValue, RawRow};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::file::read_bytes;

/// Supported row file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFormat {
    Csv,
    Json,
}

impl RowFormat {
    /// Format implied by the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Read all data rows from a `.csv` or `.json` file.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let rows = match RowFormat::from_path(path)? {
        RowFormat::Csv => read_csv_rows(path)?,
        RowFormat::Json => read_json_rows(path)?,
    };
    info!(path = %path.display(), rows = rows.len(), "rows loaded");
    Ok(rows)
}

/// Read a CSV file with a header row. Short records are padded with empty
/// cells. Blank lines yield no row, but each row keeps its file line as its
/// source row so later rows are still reported where they sit.
pub fn read_csv_rows(path: &Path) -> Result<Vec<RawRow>> {
    let bytes = read_bytes(path)?;
    let csv_error = |source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::MissingHeader {
            path: path.to_path_buf(),
        });
    }
    if let Some(index) = headers.iter().position(String::is_empty) {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
            index: index + 1,
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.len() > headers.len() {
            debug!(
                line = record.position().map(csv::Position::line),
                extra = record.len() - headers.len(),
                "ignoring cells beyond the header"
            );
        }
        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                let cell = record.get(index).map_or(CellValue::Empty, CellValue::text);
                (header.clone(), cell)
            })
            .collect();
        let line = record
            .position()
            .and_then(|position| usize::try_from(position.line()).ok());
        rows.push(match line {
            Some(line) => row.at_source_row(line),
            None => row,
        });
    }
    Ok(rows)
}

/// Read a JSON array of objects, one object per row.
pub fn read_json_rows(path: &Path) -> Result<Vec<RawRow>> {
    let bytes = read_bytes(path)?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|source| IngestError::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(items) = value else {
        return Err(IngestError::NotAnArray {
            path: path.to_path_buf(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            json_row(item).map_err(|reason| IngestError::InvalidJsonRow {
                path: path.to_path_buf(),
                index: index + 1,
                reason,
            })
        })
        .collect()
}

/// Largest integer an `f64` holds exactly.
const MAX_EXACT_INTEGER: u64 = 1 << 53;

/// Integers too large for an exact `f64` (long national IDs) stay as text.
fn number_cell(number: &serde_json::Number) -> Option<CellValue> {
    let exceeds = |magnitude: u64| magnitude > MAX_EXACT_INTEGER;
    let too_wide = number.as_u64().is_some_and(exceeds)
        || number
            .as_i64()
            .is_some_and(|value| exceeds(value.unsigned_abs()));
    if too_wide {
        return Some(CellValue::text(number.to_string()));
    }
    number.as_f64().map(CellValue::Number)
}

fn json_row(item: Value) -> std::result::Result<RawRow, String> {
    let Value::Object(fields) = item else {
        return Err("expected an object".to_string());
    };
    let mut row = RawRow::new();
    for (label, value) in fields {
        let cell = match value {
            Value::Null => CellValue::Empty,
            Value::String(text) => CellValue::text(text),
            Value::Number(number) => number_cell(&number)
                .ok_or_else(|| format!("'{label}' is not a representable number"))?,
            Value::Bool(flag) => CellValue::text(flag.to_string()),
            Value::Array(_) | Value::Object(_) => {
                return Err(format!("'{label}' must be a string, number or null"));
            }
        };
        row.push(label, cell);
    }
    Ok(row)
}
