//! Append store for new benchmark records.
//!
//! Each [`DatasetKind`] owns one JSON list file in the data directory. An
//! append reads that list, pushes the new record and writes the whole list
//! back pretty-printed.
//!
//! A target file that exists but is not a JSON list is discarded and
//! replaced by a fresh list holding only the new record. This favours
//! keeping the endpoint available over preserving a corrupted file.

use crate::record::{DatasetKind, Record};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while appending a record.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the target file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The record list could not be serialized.
    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// What an append did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppendOutcome {
    /// Dataset kind the record was filed under.
    pub kind: DatasetKind,
    /// File that was written.
    pub path: PathBuf,
    /// Number of records in the file after the append.
    pub total_records: usize,
    /// Whether unreadable previous content was discarded.
    pub recovered: bool,
}

/// Path of the append target for `kind` inside `dir`.
pub fn target_path(dir: impl AsRef<Path>, kind: DatasetKind) -> PathBuf {
    dir.as_ref().join(kind.data_file())
}

/// Append `record` to the list file for `kind` in `dir`.
///
/// Creates `dir` and the file when missing.
pub fn append_record(dir: impl AsRef<Path>, kind: DatasetKind, record: Record) -> Result<AppendOutcome> {
    let dir = dir.as_ref();
    let path = target_path(dir, kind);

    let (mut records, recovered) = read_existing(&path)?;
    records.push(record);

    fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
    write_records_json(&records, &path)?;

    info!(
        kind = %kind,
        file = kind.data_file(),
        total_records = records.len(),
        "Appended benchmark record"
    );

    Ok(AppendOutcome {
        kind,
        path,
        total_records: records.len(),
        recovered,
    })
}

/// Read the current list behind an append target.
///
/// Returns the records and whether the previous content had to be discarded.
/// Only I/O failures other than "not found" are errors.
pub fn read_existing(path: impl AsRef<Path>) -> Result<(Vec<Record>, bool)> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok((Vec::new(), false)),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    match serde_json::from_str::<serde_json::Value>(&content) {
        Ok(serde_json::Value::Array(records)) => Ok((records, false)),
        Ok(_) => {
            warn!(file = %path.display(), "Append target does not contain a list, starting a new list");
            Ok((Vec::new(), true))
        }
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Append target is not valid JSON, starting a new list");
            Ok((Vec::new(), true))
        }
    }
}

/// Write records to a JSON file, pretty-printed, replacing any content.
pub fn write_records_json(records: &[Record], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).map_err(|e| StoreError::io(path, e))
}
