//! Lexical-graph scorer - path similarity plus relation-type heuristics.

use std::sync::Arc;

use lexicon::{GameConfig, LexicalGraph, PartOfSpeech};

use crate::candidates::{RelationCandidate, RelationType};

/// Scores pairs and candidates from the lexical graph alone.
#[derive(Debug, Clone)]
pub struct LexicalScorer {
    config: Arc<GameConfig>,
}

impl LexicalScorer {
    pub fn new(config: Arc<GameConfig>) -> Self {
        Self { config }
    }

    /// Maximum path similarity over all noun/adjective sense pairs;
    /// 0.0 when either word has no senses.
    pub fn pair_similarity(&self, graph: &LexicalGraph, a: &str, b: &str) -> f32 {
        graph.max_pair_similarity(a, b, PartOfSpeech::GAME_POS)
    }

    /// Whether a pair clears the base similarity threshold.
    pub fn is_related(&self, graph: &LexicalGraph, a: &str, b: &str) -> bool {
        self.pair_similarity(graph, a, b) >= self.config.base_similarity_threshold
    }

    /// Blend of relation-type weight, weighted pair similarity, and
    /// frequency/concreteness bonuses.
    pub fn candidate_score(
        &self,
        graph: &LexicalGraph,
        candidate: &RelationCandidate,
        origin: &str,
    ) -> f32 {
        let similarity = self.pair_similarity(graph, &candidate.word, origin);
        let mut score = similarity * self.config.similarity_weight;

        score += match candidate.relation_type {
            RelationType::Synonym => self.config.synonym_weight,
            RelationType::Hyponym => self.config.hyponym_weight,
            RelationType::Hypernym => self.config.hypernym_weight,
            RelationType::Sister => self.config.sister_weight,
            RelationType::Trained => 0.0,
        };

        if self.config.common_words.contains(&candidate.word) {
            score += self.config.frequency_weight;
        }
        if graph.is_concrete_noun(&candidate.word, &self.config) {
            score += self.config.concrete_weight;
        }

        score
    }
}
