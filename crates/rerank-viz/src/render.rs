//! Rendering of the selected image and candidate.

use std::path::Path;

use image::RgbImage;
use log::{debug, warn};
use rerank_core::{
    well_formed_points, AlignedRecord, AsPoint, BatchAlignment, CoordSpace, RerankEntry, Signal,
};
use rerank_draw::{draw_bbox, draw_point, draw_sequence};

use crate::config::VizConfig;
use crate::error::VizError;

/// Which image and candidate the viewer shows.
///
/// `None` means all of them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub image: Option<String>,
    pub candidate: Option<usize>,
}

impl Selection {
    /// Candidate indices to render for `record`.
    pub fn candidates(&self, record: &AlignedRecord) -> Result<Vec<usize>, VizError> {
        match self.candidate {
            None => Ok((0..record.len()).collect()),
            Some(index) if index < record.len() => Ok(vec![index]),
            Some(index) => Err(VizError::CandidateOutOfRange {
                image: record.image_path().to_string(),
                index,
                len: record.len(),
            }),
        }
    }
}

/// Records picked by `selection.image`, matched by full path or basename.
pub fn select_records<'a>(
    batch: &'a BatchAlignment,
    selection: &Selection,
) -> Result<Vec<&'a AlignedRecord>, VizError> {
    match selection.image.as_deref() {
        None => Ok(batch.records.iter().collect()),
        Some(key) => batch
            .find(key)
            .map(|record| vec![record])
            .ok_or_else(|| VizError::UnknownImage(key.to_string())),
    }
}

/// Gaze and REC overlays of one candidate.
#[derive(Clone, Debug)]
pub struct CandidateOverlays {
    pub candidate: usize,
    pub gaze: RgbImage,
    pub rec: RgbImage,
    /// The candidate had at least one usable fixation.
    pub has_gaze: bool,
    /// The candidate had a usable REC point.
    pub has_rec: bool,
}

fn with_bbox(image: RgbImage, record: &AlignedRecord, config: &VizConfig) -> RgbImage {
    match record.bbox() {
        Some(bbox) if config.bbox_on_overlays => draw_bbox(&image, &bbox, &config.bbox),
        _ => image,
    }
}

/// Base image with the gold box outlined, or a copy when the record has none.
pub fn render_bbox(record: &AlignedRecord, base: &RgbImage, config: &VizConfig) -> RgbImage {
    match record.bbox() {
        Some(bbox) => draw_bbox(base, &bbox, &config.bbox),
        None => base.clone(),
    }
}

/// Draw the gaze path and the REC point of `candidate` on copies of `base`.
pub fn render_candidate(
    record: &AlignedRecord,
    base: &RgbImage,
    candidate: usize,
    space: CoordSpace,
    config: &VizConfig,
) -> Result<CandidateOverlays, VizError> {
    if candidate >= record.len() {
        return Err(VizError::CandidateOutOfRange {
            image: record.image_path().to_string(),
            index: candidate,
            len: record.len(),
        });
    }

    let sequence = record.gaze_sequence(candidate);
    let rec_point = record.rec_point(candidate);
    let has_gaze = !well_formed_points(sequence).is_empty();
    let has_rec = rec_point.as_point().is_some();
    if !has_gaze {
        debug!("{}: no gaze coordinates for candidate {candidate}", record.file_name());
    }
    if !has_rec {
        debug!("{}: no REC point for candidate {candidate}", record.file_name());
    }

    let gaze = draw_sequence(base, sequence, space, &config.sequence);
    let rec = draw_point(base, &rec_point, space, &config.point);
    Ok(CandidateOverlays {
        candidate,
        gaze: with_bbox(gaze, record, config),
        rec: with_bbox(rec, record, config),
        has_gaze,
        has_rec,
    })
}

/// One gaze overlay in a stored ordering.
#[derive(Clone, Debug)]
pub struct OrderedOverlay {
    pub rank: usize,
    pub index: usize,
    pub text: String,
    pub image: RgbImage,
}

/// Gaze paths of `entry` in its stored gaze order, drawn on `canvas`.
///
/// `canvas` is the letterboxed base image; the paths are in its pixel space.
pub fn render_ordered(entry: &RerankEntry, canvas: &RgbImage, config: &VizConfig) -> Vec<OrderedOverlay> {
    entry
        .ordered(Signal::Gaze)
        .map(|row| {
            let sequence = entry.sequence(row.index);
            if sequence.is_empty() {
                warn!("{}: no gaze sequence for candidate {}", entry.imagefile, row.index);
            }
            OrderedOverlay {
                rank: row.rank,
                index: row.index,
                text: row.text.to_string(),
                image: draw_sequence(canvas, sequence, CoordSpace::Pixel, &config.sequence),
            }
        })
        .collect()
}

/// `<stem>_<suffix>.png` for the image at `image_path`.
pub fn overlay_file_name(image_path: &str, suffix: &str) -> String {
    let stem = Path::new(image_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("image");
    format!("{stem}_{suffix}.png")
}
