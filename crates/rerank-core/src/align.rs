//! Merge gaze and REC score records into one validated record per image.
//!
//! Repair policy: per-candidate detail that is absent, not a list, or of the
//! wrong length is replaced by neutral placeholders (empty path, `null`
//! point). Distance arrays are padded with `+inf` or truncated. Only a
//! disagreement on `image_path` is an error.

use log::{debug, warn};
use serde_json::Value;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::record::{AlignedRecord, ScoreRecord, Signal};

/// Errors returned by [`align`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("records disagree on image path (gaze={gaze}, rec={rec})")]
    MismatchedImage { gaze: String, rec: String },
}

/// Align the gaze and REC records of one image.
///
/// Candidates are taken from the gaze record; their order is preserved and
/// every per-candidate vector of the result has the same length.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip_all, fields(image = %gaze.image_path))
)]
pub fn align(gaze: ScoreRecord, rec: ScoreRecord) -> Result<AlignedRecord, AlignmentError> {
    if gaze.image_path != rec.image_path {
        return Err(AlignmentError::MismatchedImage {
            gaze: gaze.image_path,
            rec: rec.image_path,
        });
    }

    let image_path = gaze.image_path;
    let n = gaze.candidates.len();
    if rec.candidates.len() != n {
        warn!(
            "{image_path}: REC record lists {} candidates, gaze record {n}; using gaze candidates",
            rec.candidates.len()
        );
    }

    let gaze_distances = repair_distances(gaze.distances, n, Signal::Gaze, &image_path);
    let rec_distances = repair_distances(rec.distances, n, Signal::Rec, &image_path);
    let gaze_sequences = repair_sequences(gaze.gaze_sequences, n, &image_path);
    let rec_points = repair_points(rec.rec_points, n, &image_path);

    Ok(AlignedRecord {
        bbox: gaze.bbox.or(rec.bbox),
        image_path,
        candidates: gaze.candidates,
        gaze_distances,
        rec_distances,
        gaze_sequences,
        rec_points,
    })
}

fn repair_distances(mut distances: Vec<f32>, n: usize, signal: Signal, image_path: &str) -> Vec<f32> {
    if distances.len() != n {
        warn!(
            "{image_path}: {} {signal:?} distances for {n} candidates; padding with +inf",
            distances.len()
        );
        distances.resize(n, f32::INFINITY);
    }
    distances
}

fn repair_sequences(raw: Option<Value>, n: usize, image_path: &str) -> Vec<Vec<Value>> {
    let items = match raw {
        None | Some(Value::Null) => {
            debug!("{image_path}: no gaze sequences");
            return vec![Vec::new(); n];
        }
        Some(Value::Array(items)) if items.len() == n => items,
        Some(Value::Array(items)) => {
            warn!(
                "{image_path}: {} gaze sequences for {n} candidates; using empty paths",
                items.len()
            );
            return vec![Vec::new(); n];
        }
        Some(_) => {
            warn!("{image_path}: gaze_sequences is not a list; using empty paths");
            return vec![Vec::new(); n];
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Array(points) => points,
            Value::Null => Vec::new(),
            _ => {
                debug!("{image_path}: gaze sequence {idx} is not a list");
                Vec::new()
            }
        })
        .collect()
}

fn repair_points(raw: Option<Value>, n: usize, image_path: &str) -> Vec<Value> {
    let items = match raw {
        None | Some(Value::Null) => {
            debug!("{image_path}: no REC points");
            return vec![Value::Null; n];
        }
        Some(Value::Array(items)) if items.len() == n => items,
        Some(Value::Array(items)) => {
            warn!(
                "{image_path}: {} REC points for {n} candidates; using null points",
                items.len()
            );
            return vec![Value::Null; n];
        }
        Some(_) => {
            warn!("{image_path}: rec_points is not a list; using null points");
            return vec![Value::Null; n];
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Array(_) => item,
            _ => Value::Null,
        })
        .collect()
}

/// Failed pair in a batch, by position in the input files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairFailure {
    pub index: usize,
    pub error: AlignmentError,
}

/// Result of aligning two whole scoring files.
#[derive(Clone, Debug, Default)]
pub struct BatchAlignment {
    pub records: Vec<AlignedRecord>,
    pub failures: Vec<PairFailure>,
    /// Entries without a partner because the files differ in length.
    pub unpaired: usize,
}

impl BatchAlignment {
    /// Look up a record by full image path, falling back to its file name.
    pub fn find(&self, key: &str) -> Option<&AlignedRecord> {
        self.records
            .iter()
            .find(|r| r.image_path() == key)
            .or_else(|| self.records.iter().find(|r| r.file_name() == key))
    }
}

/// Align two scoring files entry by entry.
///
/// The scorers write both files in the same order, so entries are paired by
/// position. A mismatched pair is recorded and skipped; the rest continue.
pub fn align_batch(gaze: Vec<ScoreRecord>, rec: Vec<ScoreRecord>) -> BatchAlignment {
    let unpaired = gaze.len().abs_diff(rec.len());
    if unpaired > 0 {
        warn!(
            "gaze file has {} entries, REC file {}; {unpaired} left unpaired",
            gaze.len(),
            rec.len()
        );
    }

    let mut out = BatchAlignment {
        unpaired,
        ..BatchAlignment::default()
    };
    for (index, (g, r)) in gaze.into_iter().zip(rec).enumerate() {
        match align(g, r) {
            Ok(record) => out.records.push(record),
            Err(error) => {
                warn!("skipping pair {index}: {error}");
                out.failures.push(PairFailure { index, error });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;
    use serde_json::json;

    fn two_cars() -> Vec<Candidate> {
        vec![Candidate::gold("red car"), Candidate::generated("blue car")]
    }

    #[test]
    fn mismatched_image_is_rejected() {
        let gaze = ScoreRecord::new("a.jpg", two_cars(), vec![1.0, 2.0]);
        let rec = ScoreRecord::new("b.jpg", two_cars(), vec![1.0, 2.0]);
        let err = align(gaze, rec).expect_err("paths differ");
        assert_eq!(
            err,
            AlignmentError::MismatchedImage {
                gaze: "a.jpg".into(),
                rec: "b.jpg".into()
            }
        );
    }

    #[test]
    fn preserves_candidate_order_and_distances() {
        let gaze = ScoreRecord::new("a.jpg", two_cars(), vec![3.2, 1.1]).with_bbox([1.0, 2.0, 3.0, 4.0]);
        let rec = ScoreRecord::new("a.jpg", two_cars(), vec![0.7, 0.2]);
        let record = align(gaze, rec).expect("aligned");

        assert_eq!(record.candidates(), two_cars().as_slice());
        assert_eq!(record.distances(Signal::Gaze), &[3.2, 1.1]);
        assert_eq!(record.distances(Signal::Rec), &[0.7, 0.2]);
        assert_eq!(record.bbox(), Some([1.0, 2.0, 3.0, 4.0]));
        assert_eq!(record.gaze_sequences().len(), 2);
        assert_eq!(record.rec_points().len(), 2);
        assert!(record.rec_point(0).is_none());
    }

    #[test]
    fn short_sequence_field_is_replaced_with_empty_paths() {
        let gaze = ScoreRecord::new("a.jpg", two_cars(), vec![3.2, 1.1])
            .with_gaze_sequences(json!([[[10, 10], [20, 20]]]));
        let rec = ScoreRecord::new("a.jpg", two_cars(), vec![0.7, 0.2]);
        let record = align(gaze, rec).expect("aligned");

        assert_eq!(record.gaze_sequences().len(), 2);
        assert!(record.gaze_sequences().iter().all(Vec::is_empty));
    }

    #[test]
    fn non_list_fields_become_placeholders() {
        let gaze = ScoreRecord::new("a.jpg", two_cars(), vec![1.0, 2.0])
            .with_gaze_sequences(json!("oops"));
        let rec =
            ScoreRecord::new("a.jpg", two_cars(), vec![1.0, 2.0]).with_rec_points(json!({"x": 1}));
        let record = align(gaze, rec).expect("aligned");

        assert!(record.gaze_sequences().iter().all(Vec::is_empty));
        assert!(record.rec_points().iter().all(Value::is_null));
    }

    #[test]
    fn element_wise_repair_keeps_valid_entries() {
        let gaze = ScoreRecord::new("a.jpg", two_cars(), vec![1.0, 2.0])
            .with_gaze_sequences(json!([[[1, 2], ["bad"]], 7]));
        let rec = ScoreRecord::new("a.jpg", two_cars(), vec![1.0, 2.0])
            .with_rec_points(json!([[5, 6], "nope"]));
        let record = align(gaze, rec).expect("aligned");

        assert_eq!(record.gaze_sequence(0).len(), 2);
        assert!(record.gaze_sequence(1).is_empty());
        assert_eq!(record.rec_point(0), Some(&json!([5, 6])));
        assert!(record.rec_point(1).is_none());
    }

    #[test]
    fn distance_arrays_are_padded_and_truncated() {
        let gaze = ScoreRecord::new("a.jpg", two_cars(), vec![1.0]);
        let rec = ScoreRecord::new("a.jpg", two_cars(), vec![1.0, 2.0, 3.0]);
        let record = align(gaze, rec).expect("aligned");

        assert_eq!(record.distances(Signal::Gaze), &[1.0, f32::INFINITY]);
        assert_eq!(record.distances(Signal::Rec), &[1.0, 2.0]);
    }

    #[test]
    fn batch_skips_mismatched_pairs() {
        let gaze = vec![
            ScoreRecord::new("a.jpg", two_cars(), vec![1.0, 2.0]),
            ScoreRecord::new("b.jpg", two_cars(), vec![1.0, 2.0]),
            ScoreRecord::new("dir/c.jpg", two_cars(), vec![1.0, 2.0]),
        ];
        let rec = vec![
            ScoreRecord::new("a.jpg", two_cars(), vec![1.0, 2.0]),
            ScoreRecord::new("x.jpg", two_cars(), vec![1.0, 2.0]),
            ScoreRecord::new("dir/c.jpg", two_cars(), vec![1.0, 2.0]),
            ScoreRecord::new("d.jpg", two_cars(), vec![1.0, 2.0]),
        ];
        let batch = align_batch(gaze, rec);

        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].index, 1);
        assert_eq!(batch.unpaired, 1);
        assert!(batch.find("a.jpg").is_some());
        assert_eq!(batch.find("c.jpg").map(|r| r.image_path()), Some("dir/c.jpg"));
        assert!(batch.find("b.jpg").is_none());
    }
}
