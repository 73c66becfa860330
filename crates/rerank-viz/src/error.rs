use std::path::PathBuf;

use rerank_core::RecordIoError;
use rerank_draw::StyleError;

/// Errors produced by the front end.
#[derive(thiserror::Error, Debug)]
pub enum VizError {
    #[error("failed to load {path}: {source}")]
    Records {
        path: PathBuf,
        #[source]
        source: RecordIoError,
    },

    #[error("failed to load config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: RecordIoError,
    },

    #[error("coordinate space not declared (pass --space normalized|pixel or set `space` in the config)")]
    MissingSpace,

    #[error("no aligned record matches `{0}`")]
    UnknownImage(String),

    #[error("candidate {index} out of range for {image} ({len} candidates)")]
    CandidateOutOfRange {
        image: String,
        index: usize,
        len: usize,
    },

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
