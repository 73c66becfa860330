//! JSON loading helpers for scoring files.

use std::{fs, path::Path};

use serde::Serialize;

use crate::order::RerankEntry;
use crate::record::ScoreRecord;

/// Conventional file name of the gaze scoring output.
pub const GAZE_RESULTS_FILE: &str = "gaze_scoring_results.json";
/// Conventional file name of the REC scoring output.
pub const REC_RESULTS_FILE: &str = "rec_scoring_results.json";

#[derive(thiserror::Error, Debug)]
pub enum RecordIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Load a JSON array of score records.
pub fn load_score_records(path: impl AsRef<Path>) -> Result<Vec<ScoreRecord>, RecordIoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Load a JSON array of precomputed rerank entries.
pub fn load_rerank_entries(path: impl AsRef<Path>) -> Result<Vec<RerankEntry>, RecordIoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write `value` to disk as pretty JSON.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<(), RecordIoError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
