//! Reference collections and persisted records supplied as JSON arrays.

use std::path::Path;

use relief_model::{Guardian, Martyr, StoredRecord};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{IngestError, Result};
use crate::file::read_bytes;

pub fn load_guardians(path: &Path) -> Result<Vec<Guardian>> {
    load_json_array(path, "guardians")
}

pub fn load_martyrs(path: &Path) -> Result<Vec<Martyr>> {
    load_json_array(path, "martyrs")
}

/// Records already persisted for the entity being imported, for duplicate
/// checks. Each item is `{ "id": optional, "fields": { name: value } }`.
pub fn load_existing(path: &Path) -> Result<Vec<StoredRecord>> {
    load_json_array(path, "existing records")
}

fn load_json_array<T: DeserializeOwned>(path: &Path, what: &str) -> Result<Vec<T>> {
    let bytes = read_bytes(path)?;
    let items: Vec<T> = serde_json::from_slice(&bytes).map_err(|source| IngestError::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), count = items.len(), "{what} loaded");
    Ok(items)
}
