//! JSON file collaborators: raw document reading and record writing.

use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::pipeline::EmbeddedRecord;

/// Errors raised while reading or writing pipeline files.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem access failed.
    #[error("File access failed: {0}")]
    File(#[from] std::io::Error),
    /// File contents were not valid JSON.
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// Input file did not hold a top-level JSON array of documents.
    #[error("Expected a top-level JSON array of documents")]
    NotAnArray,
}

/// Read an ordered sequence of raw documents from a JSON file.
///
/// The file must hold a top-level array; elements are passed through
/// untouched, however malformed, since the transformer owns all shape
/// tolerance.
pub fn read_documents(path: impl AsRef<Path>) -> Result<Vec<Value>, IoError> {
    let contents = fs::read_to_string(path)?;
    let parsed: Value = serde_json::from_str(&contents)?;
    match parsed {
        Value::Array(docs) => Ok(docs),
        _ => Err(IoError::NotAnArray),
    }
}

/// Write embedded records to a JSON file, pretty-printed.
pub fn write_records(path: impl AsRef<Path>, records: &[EmbeddedRecord]) -> Result<(), IoError> {
    let serialized = serde_json::to_string_pretty(records)?;
    fs::write(path, serialized)?;
    Ok(())
}
