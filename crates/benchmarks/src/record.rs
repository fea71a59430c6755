//! Benchmark record types.
//!
//! A record is an opaque JSON object describing one benchmark run. The only
//! structure this crate ever inspects is `dataset_details.type`, and only on
//! the write path, where it picks the file a new record is appended to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One benchmark run, kept exactly as it was read or posted.
pub type Record = serde_json::Value;

/// Reserved filename of the fallback data set.
///
/// It is never scanned as a user file and is only consulted when no user
/// file produced any record.
pub const DEFAULT_FALLBACK_FILE: &str = "default_mock_data.json";

/// Append target for OCR benchmark records.
pub const OCR_DATA_FILE: &str = "ocr_benchmark_data.json";

/// Append target for checkerboard detection benchmark records.
pub const CHECKERBOARD_DATA_FILE: &str = "checkerboard_benchmark_data.json";

/// Dataset kinds accepted by the write path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetKind {
    /// Optical character recognition.
    #[serde(rename = "OCR")]
    Ocr,
    /// Checkerboard (calibration target) detection.
    Checkerboard,
}

impl DatasetKind {
    /// All supported kinds.
    pub const ALL: [DatasetKind; 2] = [DatasetKind::Ocr, DatasetKind::Checkerboard];

    /// Wire name as it appears in `dataset_details.type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ocr => "OCR",
            Self::Checkerboard => "Checkerboard",
        }
    }

    /// File in the data directory that records of this kind are appended to.
    pub fn data_file(&self) -> &'static str {
        match self {
            Self::Ocr => OCR_DATA_FILE,
            Self::Checkerboard => CHECKERBOARD_DATA_FILE,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OCR" => Ok(Self::Ocr),
            "Checkerboard" => Ok(Self::Checkerboard),
            other => Err(RecordError::UnsupportedType(other.to_string())),
        }
    }
}

/// Reasons a posted record is rejected before anything touches the disk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The body is valid JSON but not an object.
    #[error("Request body must be a JSON object")]
    NotAnObject,

    /// `dataset_details` is absent or not an object.
    #[error("Missing or invalid 'dataset_details' object")]
    MissingDatasetDetails,

    /// `dataset_details.type` is absent or not a string.
    #[error("Missing or invalid 'dataset_details.type' field")]
    MissingType,

    /// `dataset_details.type` names a kind with no append target.
    #[error("Invalid dataset type '{0}', expected 'OCR' or 'Checkerboard'")]
    UnsupportedType(String),
}

/// Resolve the dataset kind of a record submitted for appending.
pub fn dataset_kind(record: &Record) -> Result<DatasetKind, RecordError> {
    let object = record.as_object().ok_or(RecordError::NotAnObject)?;
    let details = object
        .get("dataset_details")
        .and_then(|v| v.as_object())
        .ok_or(RecordError::MissingDatasetDetails)?;
    let kind = details
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or(RecordError::MissingType)?;
    kind.parse()
}
