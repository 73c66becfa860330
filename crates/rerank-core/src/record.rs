use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::candidate::Candidate;
use crate::geometry::bbox_from_value;

/// Which ranking signal a distance array belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    /// Distance of the gaze-derived point to the gold box.
    Gaze,
    /// Distance of the REC-predicted point to the gold box.
    Rec,
}

impl Signal {
    pub const ALL: [Signal; 2] = [Signal::Gaze, Signal::Rec];

    pub fn label(self) -> &'static str {
        match self {
            Signal::Gaze => "Gaze-Based Ranking",
            Signal::Rec => "REC-Based Ranking",
        }
    }
}

/// One entry of a per-signal scoring file.
///
/// The gaze file names its distances `gaze_distances`, the REC file
/// `rec_distances`; both land in `distances`. Per-candidate detail is kept as
/// raw JSON and validated by [`crate::align`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub image_path: String,
    pub candidates: Vec<Candidate>,
    #[serde(
        alias = "gaze_distances",
        alias = "rec_distances",
        default,
        deserialize_with = "distances_or_null"
    )]
    pub distances: Vec<f32>,
    /// `[x0, y0, x1, y1]` in pixel space.
    #[serde(default, deserialize_with = "lenient_bbox")]
    pub bbox: Option<[f32; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gaze_sequences: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rec_points: Option<Value>,
}

impl ScoreRecord {
    pub fn new(image_path: impl Into<String>, candidates: Vec<Candidate>, distances: Vec<f32>) -> Self {
        Self {
            image_path: image_path.into(),
            candidates,
            distances,
            bbox: None,
            gaze_sequences: None,
            rec_points: None,
        }
    }

    pub fn with_bbox(mut self, bbox: [f32; 4]) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn with_gaze_sequences(mut self, sequences: Value) -> Self {
        self.gaze_sequences = Some(sequences);
        self
    }

    pub fn with_rec_points(mut self, points: Value) -> Self {
        self.rec_points = Some(points);
        self
    }
}

// `null` distances show up when the scorer had nothing to measure; they rank last.
fn distances_or_null<'de, D>(deserializer: D) -> Result<Vec<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Option<f32>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|d| d.unwrap_or(f32::INFINITY))
        .collect())
}

fn lenient_bbox<'de, D>(deserializer: D) -> Result<Option<[f32; 4]>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(bbox_from_value))
}

/// Gaze and REC scores of one image, merged and validated.
///
/// Every per-candidate vector has exactly `len()` entries. Built by
/// [`crate::align`]; read-only afterwards.
#[derive(Clone, Debug, Serialize)]
pub struct AlignedRecord {
    pub(crate) image_path: String,
    pub(crate) bbox: Option<[f32; 4]>,
    pub(crate) candidates: Vec<Candidate>,
    pub(crate) gaze_distances: Vec<f32>,
    pub(crate) rec_distances: Vec<f32>,
    pub(crate) gaze_sequences: Vec<Vec<Value>>,
    pub(crate) rec_points: Vec<Value>,
}

impl AlignedRecord {
    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    /// Last path component of `image_path`, used for image lookups.
    pub fn file_name(&self) -> &str {
        Path::new(&self.image_path)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.image_path)
    }

    pub fn bbox(&self) -> Option<[f32; 4]> {
        self.bbox
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn candidate(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn distances(&self, signal: Signal) -> &[f32] {
        match signal {
            Signal::Gaze => &self.gaze_distances,
            Signal::Rec => &self.rec_distances,
        }
    }

    /// Raw fixation path of candidate `index`; empty when unknown.
    pub fn gaze_sequence(&self, index: usize) -> &[Value] {
        self.gaze_sequences
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Raw REC point of candidate `index`; `None` when missing or null.
    pub fn rec_point(&self, index: usize) -> Option<&Value> {
        self.rec_points.get(index).filter(|v| !v.is_null())
    }

    pub fn gaze_sequences(&self) -> &[Vec<Value>] {
        &self.gaze_sequences
    }

    pub fn rec_points(&self) -> &[Value] {
        &self.rec_points
    }
}
