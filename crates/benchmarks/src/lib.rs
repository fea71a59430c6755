//! Benchmark record storage for cvbench.
//!
//! This crate owns everything the server knows about benchmark records on
//! disk: which JSON files in the data directory are served, in what order,
//! and how new records are appended. It has no HTTP dependencies.
//!
//! # Quick Start
//!
//! ```no_run
//! use cvbench_records::{RecordLoader, LoadOutcome};
//!
//! let report = RecordLoader::default().load("data");
//! match &report.outcome {
//!     LoadOutcome::UserData(records) => println!("{} user records", records.len()),
//!     LoadOutcome::FallbackData(records) => println!("{} fallback records", records.len()),
//!     LoadOutcome::Empty => println!("no records"),
//! }
//! ```
//!
//! # Modules
//!
//! - [`record`] - Record type, dataset kinds and write-path validation
//! - [`loader`] - Directory scan and user/fallback precedence policy
//! - [`store`] - Per-kind append files
//! - [`mock`] - Placeholder records for demo mode

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod loader;
pub mod mock;
pub mod record;
pub mod store;

pub use loader::{load_records, LoadOutcome, LoadReport, RecordLoader, SkipReason, SkippedSource};
pub use mock::{generate_mock_records, MockDatasetType, DEFAULT_MOCK_COUNT};
pub use record::{
    dataset_kind, DatasetKind, Record, RecordError, CHECKERBOARD_DATA_FILE, DEFAULT_FALLBACK_FILE,
    OCR_DATA_FILE,
};
pub use store::{append_record, AppendOutcome, StoreError};
