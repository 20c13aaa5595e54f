//! Blended scorer - lexical similarity weighted against learned pair
//! scores (and optionally an embedding model) via the persisted
//! [`ModelWeights`](crate::store::ModelWeights).

use std::sync::Arc;

use lexicon::{GameConfig, LexicalGraph};

use super::{EmbeddingModel, LexicalScorer};
use crate::candidates::RelationCandidate;
use crate::store::{StoreError, WeightStore};

/// Weighted combination of the lexical and trained scorers.
///
/// When no trained record exists for a pair the blend falls back to pure
/// lexical scoring rather than diluting it with the neutral baseline.
pub struct BlendedScorer {
    lexical: LexicalScorer,
    embedding: Option<Box<dyn EmbeddingModel>>,
}

impl BlendedScorer {
    pub fn new(config: Arc<GameConfig>) -> Self {
        Self {
            lexical: LexicalScorer::new(config),
            embedding: None,
        }
    }

    /// Attach an embedding model to the blend.
    pub fn with_embedding(mut self, model: Box<dyn EmbeddingModel>) -> Self {
        self.embedding = Some(model);
        self
    }

    pub fn pair_similarity(
        &self,
        graph: &LexicalGraph,
        store: &WeightStore,
        a: &str,
        b: &str,
    ) -> Result<f32, StoreError> {
        let lexical = self.lexical.pair_similarity(graph, a, b);
        self.blend(store, lexical, store.pair(a, b)?.map(|r| r.total_score), a, b)
    }

    pub fn candidate_score(
        &self,
        graph: &LexicalGraph,
        store: &WeightStore,
        candidate: &RelationCandidate,
        origin: &str,
    ) -> Result<f32, StoreError> {
        let lexical = self.lexical.candidate_score(graph, candidate, origin);
        let trained = store
            .pair(&candidate.word, origin)?
            .map(|r| r.total_score);
        self.blend(store, lexical, trained, &candidate.word, origin)
    }

    fn blend(
        &self,
        store: &WeightStore,
        lexical: f32,
        trained: Option<f32>,
        a: &str,
        b: &str,
    ) -> Result<f32, StoreError> {
        let Some(trained) = trained else {
            return Ok(lexical);
        };

        let weights = store.model_weights()?;
        let mut score = lexical * weights.lexical_base + trained * weights.trained_base;
        if let Some(model) = &self.embedding {
            score += model.similarity(a, b) * weights.embedding_base;
        }
        Ok(score)
    }
}
