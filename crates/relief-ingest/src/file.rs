//! Whole-file reads with size and encoding checks.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Maximum input file size (100 MB).
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Read a file into memory, rejecting oversized and UTF-16 files.
/// A UTF-8 byte order mark is stripped.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    read_bytes_with_limit(path, MAX_FILE_SIZE)
}

pub fn read_bytes_with_limit(path: &Path, max_size: u64) -> Result<Vec<u8>> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::open(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    let mut bytes = std::fs::read(path).map_err(|e| IngestError::open(path, e))?;
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    Ok(bytes)
}
