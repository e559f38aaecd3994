use crate::error::IoError;
use crate::model::Record;
use std::path::Path;

/// Save records to a JSON file.
pub fn save_records(records: &[Record], path: &Path) -> Result<(), IoError> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = ?path, count = records.len(), "records saved");
    Ok(())
}

/// Load records from a JSON file.
pub fn load_records(path: &Path) -> Result<Vec<Record>, IoError> {
    let json = std::fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<Record> = serde_json::from_str(&json)?;
    tracing::info!(path = ?path, count = records.len(), "records loaded");
    Ok(records)
}
