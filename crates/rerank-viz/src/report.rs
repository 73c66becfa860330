//! Ranked tables for terminals and JSON consumers.

use std::fmt::Write as _;

use rerank_core::{rank, AlignedRecord, RankedCandidate, RerankEntry, Signal};
use serde::Serialize;

/// One ranked table.
#[derive(Clone, Debug, Serialize)]
pub struct SignalRanking<'a> {
    pub signal: Signal,
    pub title: &'static str,
    pub rows: Vec<RankedCandidate<'a>>,
}

/// Both rankings of one aligned record.
#[derive(Clone, Debug, Serialize)]
pub struct ImageReport<'a> {
    pub image_path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f32; 4]>,
    pub rankings: Vec<SignalRanking<'a>>,
}

pub fn image_report(record: &AlignedRecord) -> ImageReport<'_> {
    let rankings = Signal::ALL
        .iter()
        .map(|&signal| SignalRanking {
            signal,
            title: signal.label(),
            rows: rank(record, signal).collect(),
        })
        .collect();
    ImageReport {
        image_path: record.image_path(),
        bbox: record.bbox(),
        rankings,
    }
}

fn distance_text(d: f32) -> String {
    if d.is_finite() {
        format!("{d:.2}")
    } else {
        "n/a".to_string()
    }
}

/// Plain-text rendering of both rankings, best candidate first.
pub fn format_ranking_text(record: &AlignedRecord) -> String {
    let report = image_report(record);
    let mut out = String::new();
    let _ = writeln!(out, "== {}", report.image_path);
    for ranking in &report.rankings {
        let _ = writeln!(out, "{}", ranking.title);
        if ranking.rows.is_empty() {
            let _ = writeln!(out, "  (no candidates)");
        }
        for row in &ranking.rows {
            let _ = writeln!(
                out,
                "  {:>2}. {:>6}  {} ({})",
                row.rank,
                distance_text(row.distance),
                row.candidate.text,
                row.candidate.kind.tag()
            );
        }
    }
    out
}

/// Plain-text rendering of the stored REC and gaze orders of `entry`.
pub fn format_order_text(entry: &RerankEntry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {}", entry.imagefile);
    for (title, signal) in [("REC Ranking", Signal::Rec), ("Gaze Ranking", Signal::Gaze)] {
        let _ = writeln!(out, "{title}");
        for row in entry.ordered(signal) {
            let _ = writeln!(out, "  {:>2}. {}", row.rank, row.text);
        }
    }
    out
}
