//! Precomputed rerank results with explicit candidate orders.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::Signal;

/// One entry of a `rerank_results_*.json` file.
///
/// Orders are permutations of `all_candidates` indices computed offline.
/// `denorm_gaze_sequences` are pixel coordinates on the letterboxed canvas.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RerankEntry {
    pub imagefile: String,
    pub all_candidates: Vec<String>,
    #[serde(default)]
    pub order_rec: Vec<usize>,
    #[serde(default)]
    pub order_gaze: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denorm_gaze_sequences: Option<Value>,
}

/// One row of an explicit ordering.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OrderedCandidate<'a> {
    pub rank: usize,
    pub index: usize,
    pub text: &'a str,
}

impl RerankEntry {
    pub fn order(&self, signal: Signal) -> &[usize] {
        match signal {
            Signal::Gaze => &self.order_gaze,
            Signal::Rec => &self.order_rec,
        }
    }

    /// Candidates in the stored order for `signal`.
    ///
    /// Out-of-range and repeated indices are skipped; ranks stay contiguous.
    pub fn ordered(&self, signal: Signal) -> impl Iterator<Item = OrderedCandidate<'_>> + '_ {
        let mut seen = vec![false; self.all_candidates.len()];
        self.order(signal)
            .iter()
            .copied()
            .filter(move |&index| match seen.get_mut(index) {
                Some(flag) if !*flag => {
                    *flag = true;
                    true
                }
                Some(_) => {
                    warn!("{}: candidate {index} repeated in {signal:?} order", self.imagefile);
                    false
                }
                None => {
                    warn!(
                        "{}: {signal:?} order index {index} out of range ({} candidates)",
                        self.imagefile,
                        self.all_candidates.len()
                    );
                    false
                }
            })
            .enumerate()
            .map(move |(pos, index)| OrderedCandidate {
                rank: pos + 1,
                index,
                text: &self.all_candidates[index],
            })
    }

    /// Raw pixel-space path of candidate `index`; empty when missing.
    pub fn sequence(&self, index: usize) -> &[Value] {
        self.denorm_gaze_sequences
            .as_ref()
            .and_then(Value::as_array)
            .and_then(|all| all.get(index))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry() -> RerankEntry {
        serde_json::from_value(json!({
            "imagefile": "COCO_val2014_000000000042.jpg",
            "all_candidates": ["man on left", "dog", "red umbrella"],
            "order_rec": [2, 0, 1],
            "order_gaze": [1, 7, 1, 0],
            "denorm_gaze_sequences": [[[10, 20], [30, 40]], "bad", [[5, 5]]]
        }))
        .expect("entry")
    }

    #[test]
    fn follows_stored_order() {
        let e = entry();
        let texts: Vec<&str> = e.ordered(Signal::Rec).map(|c| c.text).collect();
        assert_eq!(texts, vec!["red umbrella", "man on left", "dog"]);
    }

    #[test]
    fn skips_invalid_and_repeated_indices() {
        let e = entry();
        let rows: Vec<OrderedCandidate<'_>> = e.ordered(Signal::Gaze).collect();
        assert_eq!(
            rows,
            vec![
                OrderedCandidate { rank: 1, index: 1, text: "dog" },
                OrderedCandidate { rank: 2, index: 0, text: "man on left" },
            ]
        );
    }

    #[test]
    fn sequence_lookup_is_lenient() {
        let e = entry();
        assert_eq!(e.sequence(0).len(), 2);
        assert!(e.sequence(1).is_empty());
        assert_eq!(e.sequence(2).len(), 1);
        assert!(e.sequence(9).is_empty());
    }
}
