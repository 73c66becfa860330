use serde::{Deserialize, Serialize};

/// Provenance of a candidate expression.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    /// Human-written referring expression for the target box.
    Gold,
    /// Model-generated alternative.
    Generated,
}

impl CandidateKind {
    /// Short tag used in ranked tables.
    pub fn tag(self) -> &'static str {
        match self {
            CandidateKind::Gold => "Gold",
            CandidateKind::Generated => "Gen",
        }
    }
}

/// One text candidate for an image. Identified by its index in the record.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: CandidateKind,
}

impl Candidate {
    pub fn new(text: impl Into<String>, kind: CandidateKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn gold(text: impl Into<String>) -> Self {
        Self::new(text, CandidateKind::Gold)
    }

    pub fn generated(text: impl Into<String>) -> Self {
        Self::new(text, CandidateKind::Generated)
    }

    pub fn is_gold(&self) -> bool {
        self.kind == CandidateKind::Gold
    }
}
