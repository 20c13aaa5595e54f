//! The turn engine - a per-session state machine over the ledger, the
//! candidate generator and the active scorer.
//!
//! Every inbound word resolves to exactly one [`ResponseCode`]. Guard
//! checks run in a fixed order (empty, reset, validation, duplicate, echo,
//! containment, relatedness) and the ledger is only mutated once the whole
//! turn has succeeded; a turn that fails mid-way leaves no partial state.

mod response;

pub use response::{EngineResponse, HistorySnapshot, ResponseCode};

use std::sync::Arc;

use tracing::{debug, error};

use lexicon::{is_contained, GameConfig, LexicalGraph, RejectReason, WordValidator};

use crate::candidates::{CandidateGenerator, RelationCandidate};
use crate::ledger::{ConversationLedger, Speaker};
use crate::scorer::{EmbeddingModel, Scorer};
use crate::store::{RatingOutcome, StoreError, WeightStore};

/// One game session: ledger, scorer and trained weights behind a single
/// entry point, [`RelationEngine::process_word`].
///
/// The configuration (with its word lists) is shared across the validator,
/// generator and scorer rather than copied per component.
pub struct RelationEngine {
    graph: Arc<LexicalGraph>,
    config: Arc<GameConfig>,
    validator: WordValidator,
    generator: CandidateGenerator,
    scorer: Scorer,
    store: WeightStore,
    ledger: ConversationLedger,
}

impl RelationEngine {
    pub fn new(graph: Arc<LexicalGraph>, config: GameConfig, store: WeightStore) -> Self {
        let config = Arc::new(config);
        let validator = WordValidator::new(&config);
        let generator = CandidateGenerator::new(Arc::clone(&config));
        let scorer = Scorer::from_config(Arc::clone(&config));
        Self {
            graph,
            config,
            validator,
            generator,
            scorer,
            store,
            ledger: ConversationLedger::new(),
        }
    }

    /// Attach an embedding model to the blended scorer. No effect on the
    /// other strategies.
    pub fn with_embedding(mut self, model: Box<dyn EmbeddingModel>) -> Self {
        self.scorer = self.scorer.with_embedding(model);
        self
    }

    pub fn ledger(&self) -> &ConversationLedger {
        &self.ledger
    }

    pub fn store(&self) -> &WeightStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut WeightStore {
        &mut self.store
    }

    /// Run one turn. Internal failures never escape: they are logged and
    /// collapsed into an [`ResponseCode::Error`] reply, and the ledger is
    /// left exactly as it was.
    pub fn process_word(&mut self, input: &str) -> EngineResponse {
        match self.run_turn(input) {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "turn aborted");
                EngineResponse::plain(ResponseCode::Error)
            }
        }
    }

    fn run_turn(&mut self, input: &str) -> Result<EngineResponse, StoreError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(EngineResponse::plain(ResponseCode::Empty));
        }
        if trimmed.eq_ignore_ascii_case("reset") {
            self.ledger.reset();
            return Ok(EngineResponse::plain(ResponseCode::Reset));
        }

        let word = match self.validator.validate(&self.graph, trimmed) {
            Ok(word) => word,
            Err(RejectReason::BannedLetter) => {
                return Ok(EngineResponse::plain(ResponseCode::Rts))
            }
            Err(_) => return Ok(EngineResponse::plain(ResponseCode::InvalidWord)),
        };

        if self.ledger.is_participant_duplicate(&word) {
            return Ok(EngineResponse::templated(ResponseCode::Duplicate, &word, ""));
        }

        let last_engine_word = self
            .ledger
            .last_word_by(Speaker::Engine)
            .map(str::to_string);

        if let Some(last) = &last_engine_word {
            if word == *last {
                return Ok(EngineResponse::templated(ResponseCode::SameWord, &word, ""));
            }
            if is_contained(&word, last) {
                return Ok(EngineResponse::templated(
                    ResponseCode::TooSimilar,
                    &word,
                    last,
                ));
            }

            let similarity = self
                .scorer
                .pair_similarity(&self.graph, &self.store, &word, last)?;
            debug!(word = %word, last = %last, similarity, "checked pair relatedness");

            if similarity < self.config.player_threshold {
                // Unrelated input: still bridge to a new word, but mark the
                // broken pair down so training learns from it.
                let (best, train_of_thought) = self.select_best(&word)?;
                return match best {
                    Some(candidate) => {
                        self.store
                            .update_rating(last, &word, self.config.unrelated_penalty)?;
                        self.ledger.append(&word, Speaker::Participant);
                        self.ledger.append(&candidate.word, Speaker::Engine);
                        Ok(EngineResponse::suggestion(
                            ResponseCode::Unrelated,
                            candidate.word,
                            train_of_thought,
                        ))
                    }
                    None => Ok(EngineResponse::plain(ResponseCode::NoRelation)),
                };
            }
        }

        let (best, train_of_thought) = self.select_best(&word)?;
        match best {
            Some(candidate) => {
                if let Some(last) = &last_engine_word {
                    self.store
                        .update_rating(last, &word, self.config.related_reward)?;
                }
                self.ledger.append(&word, Speaker::Participant);
                self.ledger.append(&candidate.word, Speaker::Engine);
                Ok(EngineResponse::suggestion(
                    ResponseCode::Related,
                    candidate.word,
                    train_of_thought,
                ))
            }
            None => Ok(EngineResponse::plain(ResponseCode::NoRelation)),
        }
    }

    /// Generate, filter, score and rank candidates for `origin`, recording
    /// each surviving stage in the reasoning trace.
    fn select_best(
        &self,
        origin: &str,
    ) -> Result<(Option<RelationCandidate>, Vec<Vec<String>>), StoreError> {
        let mut train_of_thought = Vec::new();

        let mut candidates = self.generator.generate(&self.graph, &self.store, origin)?;
        push_stage(&mut train_of_thought, &candidates);

        candidates.retain(|c| !self.ledger.contains(&c.word));
        push_stage(&mut train_of_thought, &candidates);

        candidates.retain(|c| self.validator.validate(&self.graph, &c.word).is_ok());
        candidates.retain(|c| !is_contained(origin, &c.word));
        push_stage(&mut train_of_thought, &candidates);

        let mut admissible = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !self
                .store
                .is_excluded(origin, &candidate.word, self.config.low_rating_threshold)?
            {
                admissible.push(candidate);
            }
        }
        push_stage(&mut train_of_thought, &admissible);

        for candidate in &mut admissible {
            candidate.similarity =
                self.scorer
                    .pair_similarity(&self.graph, &self.store, &candidate.word, origin)?;
            candidate.score =
                self.scorer
                    .candidate_score(&self.graph, &self.store, candidate, origin)?;
        }
        admissible.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        push_stage(&mut train_of_thought, &admissible);

        let best = admissible.into_iter().next();
        if let Some(candidate) = &best {
            train_of_thought.push(vec![candidate.word.clone()]);
        }
        Ok((best, train_of_thought))
    }

    /// Apply a rating delta between `word` and the word that immediately
    /// preceded it in the ledger. Returns `None` when `word` never appeared
    /// or had no predecessor.
    pub fn apply_feedback(
        &mut self,
        word: &str,
        delta: f32,
    ) -> Result<Option<RatingOutcome>, StoreError> {
        let word = word.to_lowercase();
        let predecessor = self
            .ledger
            .occurrences(&word)
            .last()
            .and_then(|&idx| self.ledger.entry(idx))
            .and_then(|entry| entry.previous)
            .and_then(|prev| self.ledger.entry(prev))
            .map(|entry| entry.text.clone());

        match predecessor {
            Some(prev) => Ok(Some(self.store.update_rating(&prev, &word, delta)?)),
            None => Ok(None),
        }
    }

    /// Positive reinforcement for an engine suggestion the participant
    /// explicitly accepted.
    pub fn accept_suggestion(&mut self, word: &str) -> Result<Option<RatingOutcome>, StoreError> {
        self.apply_feedback(word, self.config.accept_bonus)
    }

    /// Read-only dump of the session for the debug surface.
    pub fn history_snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            conversation_history: self.ledger.iter().cloned().collect(),
            total_words: self.ledger.len(),
            user_words: self
                .ledger
                .words_by(Speaker::Participant)
                .into_iter()
                .map(str::to_string)
                .collect(),
            current_pair: self
                .ledger
                .current_pair()
                .map(|(a, b)| (a.to_string(), b.to_string())),
        }
    }

    /// Clear the ledger, keeping trained weights and the session id.
    pub fn reset(&mut self) {
        self.ledger.reset();
    }
}

/// Record one filtering stage, skipping empty or unchanged stages.
fn push_stage(train_of_thought: &mut Vec<Vec<String>>, candidates: &[RelationCandidate]) {
    let words: Vec<String> = candidates.iter().map(|c| c.word.clone()).collect();
    if words.is_empty() {
        return;
    }
    if train_of_thought.last() == Some(&words) {
        return;
    }
    train_of_thought.push(words);
}
