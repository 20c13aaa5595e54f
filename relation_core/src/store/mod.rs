//! Trainable weight store - learned pairwise word weights and blend
//! coefficients, kept behind a small key-value persistence contract.

mod backend;
mod pair;

pub use backend::*;
pub use pair::*;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised by the weight store or its backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed stored record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result of applying one rating delta.
///
/// `actual_change` reflects the clamp to `[0, 1]`, not the requested delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingOutcome {
    pub previous_score: f32,
    pub new_score: f32,
    pub actual_change: f32,
}

const PAIRS_TABLE: &str = "word_pairs";
const WEIGHTS_TABLE: &str = "model_weights";
const WEIGHTS_KEY: &str = "active";

/// The trainable weight store.
///
/// All `total_score` mutation flows through [`WeightStore::update_rating`];
/// every write is persisted before returning.
pub struct WeightStore {
    backend: Box<dyn KeyValueBackend>,
}

impl WeightStore {
    pub fn new(backend: Box<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Convenience constructor for an ephemeral in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    /// Load the record for an unordered pair, trying both key orders.
    pub fn pair(&self, word1: &str, word2: &str) -> Result<Option<WordPairRecord>, StoreError> {
        let keys = [pair_key(word1, word2), pair_key(word2, word1)];
        for key in keys {
            if let Some(value) = self.backend.get(PAIRS_TABLE, &key)? {
                return Ok(Some(serde_json::from_value(value)?));
            }
        }
        Ok(None)
    }

    /// All records in which `word` takes part.
    pub fn pairs_for(&self, word: &str) -> Result<Vec<WordPairRecord>, StoreError> {
        let word = word.to_lowercase();
        let mut records = Vec::new();
        for (_, value) in self.backend.entries(PAIRS_TABLE)? {
            let record: WordPairRecord = serde_json::from_value(value)?;
            if record.partner_of(&word).is_some() {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Apply a rating delta to a pair, lazily creating it at neutral 0.5.
    ///
    /// The new score is the previous score plus the delta, clamped to
    /// `[0, 1]`; the recorded event carries the change actually applied.
    /// Never fails for an unknown pair.
    pub fn update_rating(
        &mut self,
        word1: &str,
        word2: &str,
        delta: f32,
    ) -> Result<RatingOutcome, StoreError> {
        let mut record = self
            .pair(word1, word2)?
            .unwrap_or_else(|| WordPairRecord::new(word1, word2));

        let previous_score = record.total_score;
        let new_score = (previous_score + delta).clamp(0.0, 1.0);
        let actual_change = new_score - previous_score;

        record.total_score = new_score;
        record.rating_events.push(RatingEvent {
            delta: actual_change,
            previous_score,
            new_score,
            timestamp: Utc::now(),
        });
        self.persist(&record)?;

        debug!(
            pair = %pair_key(&record.word1, &record.word2),
            previous_score,
            new_score,
            "applied rating delta"
        );

        Ok(RatingOutcome {
            previous_score,
            new_score,
            actual_change,
        })
    }

    /// Attach a free-text justification sentence to a pair, lazily creating
    /// the record at the neutral score.
    pub fn add_justification(
        &mut self,
        word1: &str,
        word2: &str,
        text: &str,
    ) -> Result<(), StoreError> {
        let mut record = self
            .pair(word1, word2)?
            .unwrap_or_else(|| WordPairRecord::new(word1, word2));

        record.justification_sentences.push(Justification {
            text: text.to_string(),
            timestamp: Utc::now(),
        });
        self.persist(&record)
    }

    /// Delete a pair record entirely, in either key order.
    pub fn remove_pair(&mut self, word1: &str, word2: &str) -> Result<(), StoreError> {
        self.backend.remove(PAIRS_TABLE, &pair_key(word1, word2))?;
        self.backend.remove(PAIRS_TABLE, &pair_key(word2, word1))
    }

    /// Whether a pair is explicitly rated off: at or below the low-rating
    /// threshold with no justification sentence.
    pub fn is_excluded(
        &self,
        word1: &str,
        word2: &str,
        low_rating_threshold: f32,
    ) -> Result<bool, StoreError> {
        Ok(match self.pair(word1, word2)? {
            Some(record) => {
                record.total_score <= low_rating_threshold && !record.has_justification()
            }
            None => false,
        })
    }

    /// The persisted blend weights, or defaults when none are stored yet.
    pub fn model_weights(&self) -> Result<ModelWeights, StoreError> {
        match self.backend.get(WEIGHTS_TABLE, WEIGHTS_KEY)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(ModelWeights::default()),
        }
    }

    pub fn save_model_weights(&mut self, weights: &ModelWeights) -> Result<(), StoreError> {
        self.backend
            .put(WEIGHTS_TABLE, WEIGHTS_KEY, serde_json::to_value(weights)?)
    }

    fn persist(&mut self, record: &WordPairRecord) -> Result<(), StoreError> {
        // `word1`/`word2` keep first-inserted order, so this key is stable
        // across updates regardless of the caller's argument order.
        let key = pair_key(&record.word1, &record.word2);
        self.backend
            .put(PAIRS_TABLE, &key, serde_json::to_value(record)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_pair_is_absent() {
        let store = WeightStore::in_memory();
        assert!(store.pair("dog", "canine").unwrap().is_none());
        assert!(store.pairs_for("dog").unwrap().is_empty());
    }

    #[test]
    fn test_update_rating_creates_neutral_pair() {
        let mut store = WeightStore::in_memory();

        let outcome = store.update_rating("dog", "canine", 0.1).unwrap();
        assert_eq!(outcome.previous_score, 0.5);
        assert!((outcome.new_score - 0.6).abs() < 1e-6);
        assert!((outcome.actual_change - 0.1).abs() < 1e-6);

        let record = store.pair("dog", "canine").unwrap().unwrap();
        assert_eq!(record.rating_events.len(), 1);
    }

    #[test]
    fn test_update_rating_sequence() {
        let mut store = WeightStore::in_memory();

        let first = store.update_rating("dog", "canine", 0.1).unwrap();
        let second = store.update_rating("dog", "canine", 0.1).unwrap();

        assert!((first.new_score - 0.6).abs() < 1e-6);
        assert!((second.previous_score - 0.6).abs() < 1e-6);
        assert!((second.new_score - 0.7).abs() < 1e-6);

        let record = store.pair("dog", "canine").unwrap().unwrap();
        assert_eq!(record.rating_events.len(), 2);
        assert!((record.rating_events[0].new_score - 0.6).abs() < 1e-6);
        assert!((record.rating_events[1].previous_score - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_rating_saturates_and_records_actual_change() {
        let mut store = WeightStore::in_memory();

        let outcome = store.update_rating("dog", "canine", 5.0).unwrap();
        assert_eq!(outcome.new_score, 1.0);
        assert!((outcome.actual_change - 0.5).abs() < 1e-6);

        // Already saturated: applied change is zero.
        let outcome = store.update_rating("dog", "canine", 5.0).unwrap();
        assert_eq!(outcome.new_score, 1.0);
        assert_eq!(outcome.actual_change, 0.0);

        let outcome = store.update_rating("dog", "canine", -5.0).unwrap();
        assert_eq!(outcome.new_score, 0.0);
        assert!((outcome.actual_change + 1.0).abs() < 1e-6);

        let record = store.pair("dog", "canine").unwrap().unwrap();
        let last = record.rating_events.last().unwrap();
        assert!((last.delta + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pair_lookup_is_order_insensitive() {
        let mut store = WeightStore::in_memory();
        store.update_rating("dog", "canine", 0.2).unwrap();

        let forward = store.pair("dog", "canine").unwrap().unwrap();
        let reverse = store.pair("canine", "dog").unwrap().unwrap();
        assert!((forward.total_score - reverse.total_score).abs() < 1e-6);

        // A reverse-order update lands on the same record.
        store.update_rating("canine", "dog", 0.1).unwrap();
        let record = store.pair("dog", "canine").unwrap().unwrap();
        assert_eq!(record.rating_events.len(), 2);
        assert!((record.total_score - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_pairs_for_word() {
        let mut store = WeightStore::in_memory();
        store.update_rating("dog", "canine", 0.1).unwrap();
        store.update_rating("dog", "hound", 0.2).unwrap();
        store.update_rating("cat", "feline", 0.1).unwrap();

        let pairs = store.pairs_for("dog").unwrap();
        assert_eq!(pairs.len(), 2);

        let mut partners: Vec<_> = pairs
            .iter()
            .filter_map(|p| p.partner_of("dog"))
            .collect();
        partners.sort();
        assert_eq!(partners, vec!["canine", "hound"]);
    }

    #[test]
    fn test_justifications() {
        let mut store = WeightStore::in_memory();
        store
            .add_justification("dog", "leash", "you walk a dog on a leash")
            .unwrap();

        let record = store.pair("dog", "leash").unwrap().unwrap();
        assert_eq!(record.total_score, NEUTRAL_SCORE);
        assert!(record.has_justification());
    }

    #[test]
    fn test_exclusion_rule() {
        let mut store = WeightStore::in_memory();

        // Unknown pair: not excluded.
        assert!(!store.is_excluded("dog", "moon", 0.2).unwrap());

        // Rated down to 0.1 with no justification: excluded.
        store.update_rating("dog", "moon", -0.4).unwrap();
        assert!(store.is_excluded("dog", "moon", 0.2).unwrap());

        // A justification sentence lifts the exclusion.
        store
            .add_justification("dog", "moon", "dogs howl at the moon")
            .unwrap();
        assert!(!store.is_excluded("dog", "moon", 0.2).unwrap());
    }

    #[test]
    fn test_remove_pair() {
        let mut store = WeightStore::in_memory();
        store.update_rating("dog", "canine", 0.1).unwrap();

        store.remove_pair("canine", "dog").unwrap();
        assert!(store.pair("dog", "canine").unwrap().is_none());
    }

    #[test]
    fn test_model_weights_default_and_save() {
        let mut store = WeightStore::in_memory();

        let weights = store.model_weights().unwrap();
        assert_eq!(weights.lexical_base, 0.4);

        let updated = ModelWeights {
            training_iterations: 3,
            ..weights
        };
        store.save_model_weights(&updated).unwrap();
        assert_eq!(store.model_weights().unwrap().training_iterations, 3);
    }
}
