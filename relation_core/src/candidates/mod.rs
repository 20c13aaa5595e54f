//! Candidate generation - typed relation candidates for an origin word.
//!
//! Candidates come from two sources: the lexical graph (synonyms, hyponyms,
//! hypernyms, sister terms, with per-type caps) and the weight store
//! (trained associations). Output order is unspecified; selection re-sorts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use lexicon::{GameConfig, LexicalGraph, PartOfSpeech, ScorerKind, Synset};

use crate::store::{StoreError, WeightStore};

/// How a candidate relates to the origin word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    Synonym,
    Hyponym,
    Hypernym,
    Sister,
    Trained,
}

/// Which source produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    Lexical,
    Trained,
}

/// An ephemeral reply-word candidate. Not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationCandidate {
    pub word: String,
    pub relation_type: RelationType,

    /// Human-readable phrase naming the relation.
    pub rationale: String,

    /// Relevance score used for selection; filled by the scorer.
    pub score: f32,

    /// Bounded similarity to the origin word.
    pub similarity: f32,

    pub source: CandidateSource,
}

/// Produces typed candidates for a given origin word.
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    config: Arc<GameConfig>,
}

impl CandidateGenerator {
    pub fn new(config: Arc<GameConfig>) -> Self {
        Self { config }
    }

    /// Whether trained associations are emitted alongside graph relations.
    fn trained_source_enabled(&self) -> bool {
        matches!(
            self.config.active_scorer,
            ScorerKind::Trained | ScorerKind::Blended
        )
    }

    /// Generate all candidates for `word`, deduplicated by candidate text.
    pub fn generate(
        &self,
        graph: &LexicalGraph,
        store: &WeightStore,
        word: &str,
    ) -> Result<Vec<RelationCandidate>, StoreError> {
        let origin = word.to_lowercase();
        let mut candidates = Vec::new();
        let mut seen = HashSet::new();

        for synset in graph.synsets_for_pos(&origin, PartOfSpeech::GAME_POS) {
            self.emit_synonyms(graph, synset, &origin, &mut candidates, &mut seen);
            self.emit_hyponyms(graph, synset, &origin, &mut candidates, &mut seen);
            self.emit_hypernyms(graph, synset, &origin, &mut candidates, &mut seen);
            self.emit_sisters(graph, synset, &origin, &mut candidates, &mut seen);
        }

        if self.trained_source_enabled() {
            self.emit_trained(store, &origin, &mut candidates, &mut seen)?;
        }

        Ok(candidates)
    }

    fn emit_synonyms(
        &self,
        _graph: &LexicalGraph,
        synset: &Synset,
        origin: &str,
        out: &mut Vec<RelationCandidate>,
        seen: &mut HashSet<String>,
    ) {
        for lemma in synset.lemmas.iter().take(self.config.max_synonyms) {
            let word = self.clean_lemma(lemma);
            if word == origin || !seen.insert(word.clone()) {
                continue;
            }
            out.push(self.lexical_candidate(
                word,
                RelationType::Synonym,
                format!("is a synonym of {origin}"),
            ));
        }
    }

    fn emit_hyponyms(
        &self,
        graph: &LexicalGraph,
        synset: &Synset,
        origin: &str,
        out: &mut Vec<RelationCandidate>,
        seen: &mut HashSet<String>,
    ) {
        for id in synset.hyponyms.iter().take(self.config.max_hyponyms) {
            let Some(lemma) = graph.synset(*id).and_then(|s| s.head_lemma()) else {
                continue;
            };
            let word = self.clean_lemma(lemma);
            if word == origin || !seen.insert(word.clone()) {
                continue;
            }
            out.push(self.lexical_candidate(
                word,
                RelationType::Hyponym,
                format!("is a type of {origin}"),
            ));
        }
    }

    fn emit_hypernyms(
        &self,
        graph: &LexicalGraph,
        synset: &Synset,
        origin: &str,
        out: &mut Vec<RelationCandidate>,
        seen: &mut HashSet<String>,
    ) {
        for id in synset.hypernyms.iter().take(self.config.max_hypernyms) {
            let Some(lemma) = graph.synset(*id).and_then(|s| s.head_lemma()) else {
                continue;
            };
            let word = self.clean_lemma(lemma);
            if word == origin || !seen.insert(word.clone()) {
                continue;
            }
            out.push(self.lexical_candidate(
                word,
                RelationType::Hypernym,
                format!("is a more general category than {origin}"),
            ));
        }
    }

    /// Sister terms share a direct hypernym with the origin sense; only
    /// sufficiently similar ones are emitted.
    fn emit_sisters(
        &self,
        graph: &LexicalGraph,
        synset: &Synset,
        origin: &str,
        out: &mut Vec<RelationCandidate>,
        seen: &mut HashSet<String>,
    ) {
        for parent_id in &synset.hypernyms {
            let Some(parent) = graph.synset(*parent_id) else {
                continue;
            };
            let mut emitted = 0;
            for sister_id in &parent.hyponyms {
                if emitted >= self.config.max_sisters {
                    break;
                }
                if *sister_id == synset.id {
                    continue;
                }
                let similarity = graph.path_similarity(synset.id, *sister_id).unwrap_or(0.0);
                if similarity < self.config.sister_term_threshold {
                    continue;
                }
                let Some(lemma) = graph.synset(*sister_id).and_then(|s| s.head_lemma()) else {
                    continue;
                };
                let word = self.clean_lemma(lemma);
                if word == origin || !seen.insert(word.clone()) {
                    continue;
                }
                out.push(self.lexical_candidate(
                    word,
                    RelationType::Sister,
                    format!("is related to {origin} via common parent"),
                ));
                emitted += 1;
            }
        }
    }

    /// Trained associations: every stored partner of the origin whose score
    /// clears the acceptance threshold or that carries a justification.
    fn emit_trained(
        &self,
        store: &WeightStore,
        origin: &str,
        out: &mut Vec<RelationCandidate>,
        seen: &mut HashSet<String>,
    ) -> Result<(), StoreError> {
        for record in store.pairs_for(origin)? {
            let Some(partner) = record.partner_of(origin) else {
                continue;
            };
            let accepted = record.total_score > self.config.trained_acceptance_threshold
                || record.has_justification();
            if !accepted {
                continue;
            }
            let word = partner.to_string();
            if word == origin || !seen.insert(word.clone()) {
                continue;
            }
            out.push(RelationCandidate {
                word,
                relation_type: RelationType::Trained,
                rationale: format!("trained association with {origin}"),
                score: record.total_score,
                similarity: record.total_score,
                source: CandidateSource::Trained,
            });
        }
        Ok(())
    }

    fn lexical_candidate(
        &self,
        word: String,
        relation_type: RelationType,
        rationale: String,
    ) -> RelationCandidate {
        RelationCandidate {
            word,
            relation_type,
            rationale,
            score: 0.0,
            similarity: 0.0,
            source: CandidateSource::Lexical,
        }
    }

    fn clean_lemma(&self, lemma: &str) -> String {
        lemma
            .to_lowercase()
            .replace('_', &self.config.lemma_separator_replacement)
    }
}
