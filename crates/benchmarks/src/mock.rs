//! Placeholder benchmark records for demo mode.
//!
//! When the data directory yields nothing, the API can serve a batch of
//! generated records so the frontend has something to plot. The generator
//! takes the random source and the reference time as arguments, so a seeded
//! [`rand::rngs::StdRng`] gives the same batch every time.

use crate::record::Record;
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;

/// Default size of a generated batch.
pub const DEFAULT_MOCK_COUNT: usize = 20;

const ALGORITHM_PREFIXES: &[&str] = &[
    "Tesseract", "Easy", "Paddle", "Deep", "Fast", "Robust", "Chess", "Corner", "Neural", "Vision",
];
const ALGORITHM_SUFFIXES: &[&str] = &[
    "OCR", "Text", "Detector", "Checkerboard", "Net", "Finder", "Lite", "Pro",
];
const DATASET_PREFIXES: &[&str] = &[
    "Invoice", "Receipt", "Street", "Calibration", "Document", "License", "Industrial", "Synthetic",
];
const DATASET_SUFFIXES: &[&str] = &["Scans", "Images", "Set", "Boards", "Captures", "Corpus"];

const SECONDS_PER_YEAR: i64 = 365 * 24 * 60 * 60;

/// Classification given to generated records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockDatasetType {
    /// Text recognition.
    Ocr,
    /// Corner/board detection.
    Detection,
    /// Anything else.
    General,
}

impl MockDatasetType {
    /// Classify by keywords in the algorithm name.
    pub fn classify(algorithm_name: &str) -> Self {
        let name = algorithm_name.to_lowercase();
        if ["ocr", "text", "tesseract"].iter().any(|k| name.contains(k)) {
            Self::Ocr
        } else if ["checkerboard", "corner", "detect", "chess"]
            .iter()
            .any(|k| name.contains(k))
        {
            Self::Detection
        } else {
            Self::General
        }
    }

    /// Value written to `dataset_details.type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ocr => "OCR",
            Self::Detection => "Detection",
            Self::General => "General",
        }
    }
}

/// Generate `count` placeholder records dated within the year before `now`.
pub fn generate_mock_records<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    now: DateTime<Utc>,
) -> Vec<Record> {
    (0..count).map(|_| generate_mock_record(rng, now)).collect()
}

/// Generate one placeholder record.
pub fn generate_mock_record<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Record {
    let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
    let algorithm_name = compose_name(rng, ALGORITHM_PREFIXES, ALGORITHM_SUFFIXES);
    let dataset_name = compose_name(rng, DATASET_PREFIXES, DATASET_SUFFIXES);
    let dataset_type = MockDatasetType::classify(&algorithm_name);

    let run_date = now - Duration::seconds(rng.gen_range(0..SECONDS_PER_YEAR));

    let image_count: u32 = rng.gen_range(50..=5000);
    let total_seconds = round(rng.gen_range(1.0..600.0), 3);
    let speed_metrics = json!({
        "processing_time_seconds_total": total_seconds,
        "processing_time_seconds_per_unit": round(total_seconds / f64::from(image_count), 6),
        "units_per_second": round(f64::from(image_count) / total_seconds, 3),
    });

    let accuracy_metrics = match dataset_type {
        MockDatasetType::Ocr => json!({
            "character_error_rate": round(rng.gen_range(0.005..0.15), 4),
            "word_error_rate": round(rng.gen_range(0.01..0.30), 4),
            "exact_match_accuracy": round(rng.gen_range(60.0..99.5), 2),
        }),
        MockDatasetType::Detection => json!({
            "detection_rate": round(rng.gen_range(70.0..100.0), 2),
            "average_corner_distance_error_pixels": round(rng.gen_range(0.05..3.0), 3),
        }),
        MockDatasetType::General => json!({
            "mean_average_precision": round(rng.gen_range(0.3..0.95), 4),
        }),
    };

    json!({
        "id": id.to_string(),
        "algorithm_name": algorithm_name,
        "algorithm_version": format!("v{}.{}", rng.gen_range(1..=4), rng.gen_range(0..10)),
        "dataset_name": dataset_name,
        "dataset_details": {
            "type": dataset_type.as_str(),
            "image_count": image_count,
        },
        "benchmark_run_date": run_date.to_rfc3339(),
        "speed_metrics": speed_metrics,
        "accuracy_metrics": accuracy_metrics,
    })
}

fn compose_name<R: Rng + ?Sized>(rng: &mut R, prefixes: &[&str], suffixes: &[&str]) -> String {
    let prefix = prefixes.choose(rng).copied().unwrap_or_default();
    let suffix = suffixes.choose(rng).copied().unwrap_or_default();
    format!("{}{}", prefix, suffix)
}

fn round(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
