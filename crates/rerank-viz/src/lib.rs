//! High-level facade for the `rerank-*` workspace.
//!
//! This crate provides:
//! - re-exports of the alignment/ranking core and the overlay renderer
//! - an image-source collaborator keyed by file name
//! - candidate-selection rendering and ranked-table reports
//! - the `rerank-viz` command-line front end (feature `cli`)
//!
//! ## Quickstart
//!
//! ```no_run
//! use rerank_viz::core::{align_batch, load_score_records, CoordSpace};
//! use rerank_viz::{render_candidate, DirImageSource, ImageSource, VizConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let gaze = load_score_records("gaze_scoring_results.json")?;
//! let rec = load_score_records("rec_scoring_results.json")?;
//! let batch = align_batch(gaze, rec);
//!
//! let source = DirImageSource::new("data/overlayed_images");
//! let record = &batch.records[0];
//! let base = source.lookup(record.file_name())?;
//! let overlays = render_candidate(record, &base, 0, CoordSpace::Normalized, &VizConfig::default())?;
//! overlays.gaze.save("candidate0_gaze.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `rerank_viz::core`: score records, alignment, ranking, JSON I/O, logging.
//! - `rerank_viz::draw`: colormaps, colors, overlay drawing, letterboxing.

pub use rerank_core as core;
pub use rerank_draw as draw;

mod config;
mod error;
mod render;
mod report;
mod source;

pub use config::{LetterboxConfig, VizConfig};
pub use error::VizError;
pub use render::{
    overlay_file_name, render_bbox, render_candidate, render_ordered, select_records,
    CandidateOverlays, OrderedOverlay, Selection,
};
pub use report::{format_order_text, format_ranking_text, image_report, ImageReport, SignalRanking};
pub use source::{DirImageSource, ImageSource, LookupError, MemoryImageSource};
