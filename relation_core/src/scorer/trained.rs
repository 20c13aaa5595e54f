//! Trained scorer - learned pair weights only.

use crate::candidates::RelationCandidate;
use crate::store::{StoreError, WeightStore, NEUTRAL_SCORE};

/// Scores pairs from the weight store alone.
///
/// Unknown pairs are neutral (0.5), not unrelated; the store only ever
/// moves pairs away from that baseline through explicit feedback.
#[derive(Debug, Clone, Default)]
pub struct TrainedScorer;

impl TrainedScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn pair_similarity(
        &self,
        store: &WeightStore,
        a: &str,
        b: &str,
    ) -> Result<f32, StoreError> {
        Ok(store
            .pair(a, b)?
            .map(|record| record.total_score)
            .unwrap_or(NEUTRAL_SCORE))
    }

    pub fn candidate_score(
        &self,
        store: &WeightStore,
        candidate: &RelationCandidate,
        origin: &str,
    ) -> Result<f32, StoreError> {
        self.pair_similarity(store, &candidate.word, origin)
    }
}
