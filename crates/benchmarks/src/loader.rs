//! Record Store Loader.
//!
//! Scans a data directory for `*.json` source files and decides which of
//! them feed the record collection:
//!
//! 1. Every `.json` file other than the fallback file is a *user file*. All
//!    user files that parse to a JSON list are concatenated.
//! 2. If that produced at least one record, it is returned as-is.
//! 3. Otherwise the fallback file (if configured, present and a list) is
//!    returned instead.
//! 4. Otherwise the collection is empty.
//!
//! User data and fallback data are never combined. Nothing in here returns an
//! error: unreadable, malformed or wrongly shaped files are logged, recorded
//! in the [`LoadReport`] and skipped.

use crate::record::{Record, DEFAULT_FALLBACK_FILE};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Extension identifying source files.
pub const JSON_EXTENSION: &str = ".json";

/// Which source the loader settled on.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// At least one user file contributed records.
    UserData(Vec<Record>),
    /// No user records; the fallback file was served.
    FallbackData(Vec<Record>),
    /// Neither user files nor the fallback file produced a list.
    Empty,
}

impl LoadOutcome {
    /// Borrow the selected records.
    pub fn records(&self) -> &[Record] {
        match self {
            Self::UserData(records) | Self::FallbackData(records) => records,
            Self::Empty => &[],
        }
    }

    /// Take the selected records.
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Self::UserData(records) | Self::FallbackData(records) => records,
            Self::Empty => Vec::new(),
        }
    }

    /// Short name of the winning source, used in logs and CLI output.
    pub fn source_name(&self) -> &'static str {
        match self {
            Self::UserData(_) => "user",
            Self::FallbackData(_) => "fallback",
            Self::Empty => "empty",
        }
    }
}

/// Why a source file contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The file could not be read.
    Unreadable(String),
    /// The content is not valid JSON.
    Malformed(String),
    /// Valid JSON whose root is not a list.
    NotAList,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable(e) => write!(f, "unreadable: {}", e),
            Self::Malformed(e) => write!(f, "malformed JSON: {}", e),
            Self::NotAList => f.write_str("root is not a list"),
        }
    }
}

/// A source file that was skipped during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSource {
    /// File name relative to the data directory.
    pub file: String,
    /// What was wrong with it.
    pub reason: SkipReason,
}

/// Result of one directory scan.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// Selected records.
    pub outcome: LoadOutcome,
    /// Whether any user file (valid or not) was present.
    pub user_files_found: bool,
    /// Every file that was looked at and skipped, in scan order.
    pub skipped: Vec<SkippedSource>,
}

impl LoadReport {
    fn empty() -> Self {
        Self {
            outcome: LoadOutcome::Empty,
            user_files_found: false,
            skipped: Vec::new(),
        }
    }

    /// Take the selected records.
    pub fn into_records(self) -> Vec<Record> {
        self.outcome.into_records()
    }
}

/// Loads records from a data directory under the precedence policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLoader {
    fallback_file: Option<String>,
}

impl Default for RecordLoader {
    fn default() -> Self {
        Self::new(Some(DEFAULT_FALLBACK_FILE))
    }
}

impl RecordLoader {
    /// Create a loader with the given fallback filename, or none to disable
    /// the fallback entirely.
    pub fn new(fallback_file: Option<impl Into<String>>) -> Self {
        Self {
            fallback_file: fallback_file.map(Into::into),
        }
    }

    /// Create a loader that only ever serves user files.
    pub fn without_fallback() -> Self {
        Self {
            fallback_file: None,
        }
    }

    /// The reserved fallback filename, if any.
    pub fn fallback_file(&self) -> Option<&str> {
        self.fallback_file.as_deref()
    }

    /// Scan `dir` and select records.
    pub fn load(&self, dir: impl AsRef<Path>) -> LoadReport {
        let dir = dir.as_ref();
        let mut report = LoadReport::empty();

        if !dir.exists() {
            warn!(data_dir = %dir.display(), "Data directory not found, serving no records");
            return report;
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(data_dir = %dir.display(), error = %e, "Data directory could not be listed");
                return report;
            }
        };

        info!(data_dir = %dir.display(), "Scanning for user-provided benchmark data");

        let mut user_records = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.ends_with(JSON_EXTENSION) || self.is_fallback(&name) {
                continue;
            }
            report.user_files_found = true;

            match read_record_list(&entry.path()) {
                Ok(records) => {
                    debug!(file = %name, records = records.len(), "Loaded user data file");
                    user_records.extend(records);
                }
                Err(reason) => {
                    log_skip(&name, &reason);
                    report.skipped.push(SkippedSource { file: name, reason });
                }
            }
        }

        if !user_records.is_empty() {
            info!(records = user_records.len(), "Serving user-provided data");
            report.outcome = LoadOutcome::UserData(user_records);
            return report;
        }

        if report.user_files_found {
            info!("User data files were found but produced no records");
        } else {
            info!("No user data files found");
        }

        report.outcome = self.load_fallback(dir, &mut report.skipped);
        report
    }

    fn is_fallback(&self, name: &str) -> bool {
        self.fallback_file.as_deref() == Some(name)
    }

    fn load_fallback(&self, dir: &Path, skipped: &mut Vec<SkippedSource>) -> LoadOutcome {
        let Some(name) = self.fallback_file.as_deref() else {
            return LoadOutcome::Empty;
        };

        let path = dir.join(name);
        if !path.exists() {
            info!(file = %name, "Fallback data file not found");
            return LoadOutcome::Empty;
        }

        match read_record_list(&path) {
            Ok(records) => {
                info!(file = %name, records = records.len(), "Serving fallback data");
                LoadOutcome::FallbackData(records)
            }
            Err(reason) => {
                log_skip(name, &reason);
                skipped.push(SkippedSource {
                    file: name.to_string(),
                    reason,
                });
                LoadOutcome::Empty
            }
        }
    }
}

/// Load records from `dir` with the default fallback filename.
pub fn load_records(dir: impl AsRef<Path>) -> Vec<Record> {
    RecordLoader::default().load(dir).into_records()
}

fn read_record_list(path: &Path) -> Result<Vec<Record>, SkipReason> {
    let content = fs::read_to_string(path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| SkipReason::Malformed(e.to_string()))?;
    match value {
        serde_json::Value::Array(records) => Ok(records),
        _ => Err(SkipReason::NotAList),
    }
}

fn log_skip(file: &str, reason: &SkipReason) {
    match reason {
        SkipReason::NotAList => warn!(file = %file, "JSON file does not contain a list, skipping"),
        other => error!(file = %file, reason = %other, "Failed to load JSON file, skipping"),
    }
}
