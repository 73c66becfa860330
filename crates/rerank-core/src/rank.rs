use serde::Serialize;

use crate::candidate::Candidate;
use crate::record::{AlignedRecord, Signal};

/// One row of a ranked table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RankedCandidate<'a> {
    /// 1-based position in the ranking.
    pub rank: usize,
    /// Index of the candidate in its record.
    pub index: usize,
    pub candidate: &'a Candidate,
    pub distance: f32,
}

/// Candidate indices sorted by ascending distance.
///
/// The sort is stable, so equal distances keep their original order.
pub fn ranking_order(distances: &[f32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..distances.len()).collect();
    order.sort_by(|&a, &b| {
        let (da, db) = (distances[a], distances[b]);
        da.partial_cmp(&db).unwrap_or_else(|| da.total_cmp(&db))
    });
    order
}

/// Rank the candidates of `record` by `signal`, best (lowest distance) first.
///
/// Pure: every call yields the same sequence for the same record.
pub fn rank(record: &AlignedRecord, signal: Signal) -> impl ExactSizeIterator<Item = RankedCandidate<'_>> + '_ {
    let distances = record.distances(signal);
    ranking_order(distances)
        .into_iter()
        .enumerate()
        .map(move |(pos, index)| RankedCandidate {
            rank: pos + 1,
            index,
            candidate: &record.candidates()[index],
            distance: distances[index],
        })
}
