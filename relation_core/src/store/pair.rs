//! Persisted record types - word pairs and model blend weights.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Neutral score assigned to pairs nobody has rated yet.
pub const NEUTRAL_SCORE: f32 = 0.5;

/// Storage key for an unordered word pair: `"<word1>-<word2>"`, lowercase,
/// in first-inserted order. Lookups must try both orders.
pub fn pair_key(word1: &str, word2: &str) -> String {
    format!("{}-{}", word1.to_lowercase(), word2.to_lowercase())
}

/// One applied rating adjustment.
///
/// `delta` is the change actually applied after clamping, which can differ
/// from what the caller requested when the score saturates at 0 or 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingEvent {
    pub delta: f32,
    pub previous_score: f32,
    pub new_score: f32,
    pub timestamp: DateTime<Utc>,
}

/// A free-text explanation of why two words relate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Justification {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Learned relatedness of one unordered word pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordPairRecord {
    pub word1: String,
    pub word2: String,

    /// Bounded total score in `[0, 1]`; 0.5 is neutral.
    pub total_score: f32,

    pub rating_events: Vec<RatingEvent>,
    pub justification_sentences: Vec<Justification>,
    pub created_at: DateTime<Utc>,
}

impl WordPairRecord {
    /// Create a fresh record at the neutral score.
    pub fn new(word1: &str, word2: &str) -> Self {
        Self {
            word1: word1.to_lowercase(),
            word2: word2.to_lowercase(),
            total_score: NEUTRAL_SCORE,
            rating_events: Vec::new(),
            justification_sentences: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// The partner of `word` in this pair, if `word` is part of it.
    pub fn partner_of(&self, word: &str) -> Option<&str> {
        let word = word.to_lowercase();
        if self.word1 == word {
            Some(self.word2.as_str())
        } else if self.word2 == word {
            Some(self.word1.as_str())
        } else {
            None
        }
    }

    /// Whether any non-empty justification sentence is recorded.
    pub fn has_justification(&self) -> bool {
        self.justification_sentences
            .iter()
            .any(|j| !j.text.trim().is_empty())
    }
}

/// Blend coefficients and training counters, persisted as a singleton.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelWeights {
    /// Weight of the lexical-graph similarity in the blended score.
    pub lexical_base: f32,
    /// Weight of the learned pair score.
    pub trained_base: f32,
    /// Weight of the optional embedding similarity.
    pub embedding_base: f32,

    pub learning_rate: f32,

    pub training_iterations: u32,
    pub correct_predictions: u32,
    pub total_predictions: u32,

    pub created_at: DateTime<Utc>,
}

impl Default for ModelWeights {
    fn default() -> Self {
        Self {
            lexical_base: 0.4,
            trained_base: 0.4,
            embedding_base: 0.2,
            learning_rate: 0.01,
            training_iterations: 0,
            correct_predictions: 0,
            total_predictions: 0,
            created_at: Utc::now(),
        }
    }
}
