//! Loading for beneficiary imports.
//!
//! Reads spreadsheet exports (CSV or JSON) into [`RawRow`](relief_model::RawRow)s and
//! loads the guardian, martyr and persisted-record collections the engine
//! validates against. Every failure here is fatal to the batch and surfaces
//! before any row is validated.

mod error;
mod file;
mod headers;
mod references;
mod rows;

// === Error Types ===
pub use error::{IngestError, Result};

// === Files ===
pub use file::{MAX_FILE_SIZE, read_bytes, read_bytes_with_limit};

// === Rows ===
pub use headers::{HeaderCheck, check_headers};
pub use rows::{RowFormat, read_csv_rows, read_json_rows, read_rows};

// === Reference Collections ===
pub use references::{load_existing, load_guardians, load_martyrs};
