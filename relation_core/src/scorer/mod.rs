//! Scorer strategies - interchangeable pair-similarity and candidate
//! scoring, selected once at construction from configuration.

mod blended;
mod lexical;
mod trained;

pub use blended::*;
pub use lexical::*;
pub use trained::*;

use std::sync::Arc;

use lexicon::{GameConfig, LexicalGraph, ScorerKind};

use crate::candidates::RelationCandidate;
use crate::store::{StoreError, WeightStore};

/// Interface to the external embedding-model wrapper.
///
/// Implementations live outside this crate; the blend only ever needs a
/// bounded similarity for a word pair.
pub trait EmbeddingModel: Send {
    fn similarity(&self, a: &str, b: &str) -> f32;
}

/// The configured scoring strategy.
pub enum Scorer {
    Lexical(LexicalScorer),
    Trained(TrainedScorer),
    Blended(BlendedScorer),
}

impl Scorer {
    /// Build the strategy named by `config.active_scorer`.
    pub fn from_config(config: Arc<GameConfig>) -> Self {
        match config.active_scorer {
            ScorerKind::Lexical => Scorer::Lexical(LexicalScorer::new(config)),
            ScorerKind::Trained => Scorer::Trained(TrainedScorer::new()),
            ScorerKind::Blended => Scorer::Blended(BlendedScorer::new(config)),
        }
    }

    /// Attach an embedding model; only the blended strategy uses one.
    pub fn with_embedding(self, model: Box<dyn EmbeddingModel>) -> Self {
        match self {
            Scorer::Blended(blended) => Scorer::Blended(blended.with_embedding(model)),
            other => other,
        }
    }

    /// Similarity of a word pair under this strategy.
    pub fn pair_similarity(
        &self,
        graph: &LexicalGraph,
        store: &WeightStore,
        a: &str,
        b: &str,
    ) -> Result<f32, StoreError> {
        match self {
            Scorer::Lexical(s) => Ok(s.pair_similarity(graph, a, b)),
            Scorer::Trained(s) => s.pair_similarity(store, a, b),
            Scorer::Blended(s) => s.pair_similarity(graph, store, a, b),
        }
    }

    /// Relevance of a candidate relative to its origin word.
    pub fn candidate_score(
        &self,
        graph: &LexicalGraph,
        store: &WeightStore,
        candidate: &RelationCandidate,
        origin: &str,
    ) -> Result<f32, StoreError> {
        match self {
            Scorer::Lexical(s) => Ok(s.candidate_score(graph, candidate, origin)),
            Scorer::Trained(s) => s.candidate_score(store, candidate, origin),
            Scorer::Blended(s) => s.candidate_score(graph, store, candidate, origin),
        }
    }
}
