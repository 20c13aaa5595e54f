//! Word entry definitions - one spoken word instance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who spoke a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Participant,
    Engine,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speaker::Participant => write!(f, "participant"),
            Speaker::Engine => write!(f, "engine"),
        }
    }
}

/// One spoken word instance in the conversation.
///
/// Entries form a doubly-linked chain through `previous`/`next`, which are
/// arena indices into the owning ledger rather than object references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordEntry {
    /// Lowercased word text.
    pub text: String,

    pub speaker: Speaker,

    /// Zero-based, strictly increasing across the ledger.
    pub sequence_index: usize,

    pub timestamp: DateTime<Utc>,

    /// Arena index of the prior entry in the whole conversation.
    pub previous: Option<usize>,

    /// Arena index of the following entry, set when it is appended.
    pub next: Option<usize>,
}
