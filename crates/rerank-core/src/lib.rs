//! Score records, alignment and ranking for gaze-vs-REC candidate comparison.
//!
//! This crate is intentionally small and does *not* depend on any image type.
//! It turns the per-signal scoring files into one [`AlignedRecord`] per image
//! and ranks candidates by either signal. Rendering lives in `rerank-draw`.
//!
//! ```
//! use rerank_core::{align, rank, Candidate, ScoreRecord, Signal};
//!
//! let candidates = vec![Candidate::gold("red car"), Candidate::generated("blue car")];
//! let gaze = ScoreRecord::new("imgs/0001.jpg", candidates.clone(), vec![3.2, 1.1]);
//! let rec = ScoreRecord::new("imgs/0001.jpg", candidates, vec![0.4, 0.9]);
//!
//! let record = align(gaze, rec).expect("same image");
//! let best = rank(&record, Signal::Gaze).next().expect("non-empty");
//! assert_eq!(best.candidate.text, "blue car");
//! ```

mod align;
mod candidate;
mod geometry;
mod io;
mod logger;
mod order;
mod rank;
mod record;

pub use align::{align, align_batch, AlignmentError, BatchAlignment, PairFailure};
pub use candidate::{Candidate, CandidateKind};
pub use geometry::{
    bbox_from_value, pixel_to_normalized, scale_factors, well_formed_points, AsPoint, CoordSpace,
    NORMALIZED_EXTENT,
};
pub use io::{
    load_rerank_entries, load_score_records, write_json, RecordIoError, GAZE_RESULTS_FILE,
    REC_RESULTS_FILE,
};
pub use order::{OrderedCandidate, RerankEntry};
pub use rank::{rank, ranking_order, RankedCandidate};
pub use record::{AlignedRecord, ScoreRecord, Signal};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_from_verbosity};

pub use nalgebra::Point2;
