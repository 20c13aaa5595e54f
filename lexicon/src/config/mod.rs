//! Game configuration - thresholds, caps, letter rules, and word lists.
//!
//! Defaults match the tuned production constants; any field can be
//! overridden from a TOML file.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::LexiconError;

/// Which scorer strategy the engine runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScorerKind {
    /// Lexical-graph path similarity only.
    Lexical,
    /// Learned pair weights only.
    Trained,
    /// Learned weights blended with lexical similarity.
    #[default]
    Blended,
}

/// All tunable game constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Minimum similarity for a participant word to count as related.
    pub player_threshold: f32,
    /// Base similarity for the "is related" judgement.
    pub base_similarity_threshold: f32,
    /// Minimum similarity for sister terms to be emitted at all.
    pub sister_term_threshold: f32,
    /// Trained pairs above this total score are emitted as candidates.
    pub trained_acceptance_threshold: f32,
    /// Pairs rated at or below this score (with no justification) are
    /// excluded from selection.
    pub low_rating_threshold: f32,

    /// Per-sense candidate caps.
    pub max_synonyms: usize,
    pub max_hyponyms: usize,
    pub max_hypernyms: usize,
    pub max_sisters: usize,

    /// Leading letters banned by the game rule.
    pub banned_letters: Vec<char>,
    pub enforce_banned_letters: bool,

    /// Candidate scoring weights.
    pub similarity_weight: f32,
    pub synonym_weight: f32,
    pub hyponym_weight: f32,
    pub hypernym_weight: f32,
    pub sister_weight: f32,
    pub frequency_weight: f32,
    pub concrete_weight: f32,

    /// Rating deltas applied by the engine and the feedback surface.
    pub unrelated_penalty: f32,
    pub related_reward: f32,
    pub accept_bonus: f32,

    /// Replacement for `_` in multi-word lemmas.
    pub lemma_separator_replacement: String,

    pub active_scorer: ScorerKind,

    /// Everyday words that receive a frequency bonus.
    pub common_words: HashSet<String>,
    /// Sense names whose hyponym subtrees are considered concrete.
    pub concrete_roots: HashSet<String>,
    /// Definition keywords marking a sense as abstract.
    pub abstract_keywords: HashSet<String>,
    /// Definition keywords marking a sense as concrete.
    pub concrete_indicators: HashSet<String>,
}

impl GameConfig {
    /// Parse a configuration from TOML text; missing fields keep defaults.
    pub fn from_toml_str(data: &str) -> Result<Self, LexiconError> {
        Ok(toml::from_str(data)?)
    }

    /// Load a configuration from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_toml_str(&data)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_threshold: 0.5,
            base_similarity_threshold: 0.2,
            sister_term_threshold: 0.5,
            trained_acceptance_threshold: 0.5,
            low_rating_threshold: 0.2,

            max_synonyms: 5,
            max_hyponyms: 20,
            max_hypernyms: 10,
            max_sisters: 3,

            banned_letters: vec!['r', 't', 's'],
            enforce_banned_letters: true,

            similarity_weight: 0.4,
            synonym_weight: 0.25,
            hyponym_weight: 0.2,
            hypernym_weight: 0.2,
            sister_weight: 0.15,
            frequency_weight: 0.15,
            concrete_weight: 0.1,

            unrelated_penalty: -0.1,
            related_reward: 0.0,
            accept_bonus: 0.1,

            lemma_separator_replacement: String::new(),

            active_scorer: ScorerKind::default(),

            common_words: to_set(COMMON_WORDS),
            concrete_roots: to_set(CONCRETE_ROOTS),
            abstract_keywords: to_set(ABSTRACT_KEYWORDS),
            concrete_indicators: to_set(CONCRETE_INDICATORS),
        }
    }
}

fn to_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Everyday words boosted by the frequency bonus.
const COMMON_WORDS: &[&str] = &[
    "dog", "cat", "house", "book", "food", "water", "bed", "chair", "phone", "car", "door", "box",
    "cup", "desk", "bird", "fish", "hand", "key", "milk", "paper", "coin", "glass", "mouth",
    "nose", "ball", "eye", "beach",
];

/// Sense names that anchor the concrete part of the taxonomy.
const CONCRETE_ROOTS: &[&str] = &[
    "physical_entity.n.01",
    "matter.n.03",
    "artifact.n.01",
    "natural_object.n.01",
    "organism.n.01",
    "plant.n.02",
    "animal.n.01",
    "substance.n.01",
    "food.n.01",
    "object.n.01",
    "structure.n.01",
    "body_part.n.01",
];

/// Definition keywords that flag an abstract sense.
const ABSTRACT_KEYWORDS: &[&str] = &[
    "abstract", "quality", "state", "condition", "feeling", "emotion", "concept", "idea",
    "activity", "action", "process", "phenomenon", "manner", "way", "belief", "thought", "system",
    "method", "principle", "theory", "relationship", "attitude", "perception", "intention",
    "event", "time", "situation", "experience", "notion", "perspective", "value", "judgment",
    "opinion", "motivation", "consciousness", "awareness", "memory", "imagination", "creativity",
    "ethics", "morality", "justice", "freedom", "culture", "language", "knowledge", "wisdom",
    "faith", "hope", "love", "fear", "curiosity", "decision", "expectation", "possibility",
    "potential", "responsibility", "intellect", "attention", "strategy", "goal", "habit",
    "intuition", "insight", "identity", "motif", "theme", "ideal", "rule", "norm", "law",
    "influence", "conceptualization", "inspiration", "state of mind", "impression", "symbolism",
];

/// Definition keywords that flag a concrete sense.
const CONCRETE_INDICATORS: &[&str] = &[
    "object", "thing", "item", "entity", "physical", "material", "substance", "structure",
    "device", "tool", "container", "animal", "plant", "machine", "building", "vehicle",
    "furniture", "instrument", "appliance", "equipment", "artifact", "product", "element",
    "component", "part", "organism", "creature", "materiality", "surface", "texture", "solid",
    "liquid", "gas", "metal", "wood", "fabric", "clothing", "fruit", "vegetable", "mineral",
    "rock", "body", "hand", "face", "foot", "flower", "leaf", "seed", "toolkit", "utensil",
    "weapon", "box", "bag", "fossil", "statue", "coin", "jewel", "gem", "crystal", "fiber",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.player_threshold, 0.5);
        assert_eq!(config.max_hyponyms, 20);
        assert_eq!(config.banned_letters, vec!['r', 't', 's']);
        assert_eq!(config.active_scorer, ScorerKind::Blended);
        assert!(config.common_words.contains("dog"));
        assert!(config.concrete_roots.contains("animal.n.01"));
    }

    #[test]
    fn test_partial_toml_override() {
        let config = GameConfig::from_toml_str(
            r#"
            player_threshold = 0.25
            active_scorer = "lexical"
            banned_letters = ["q"]
            "#,
        )
        .unwrap();

        assert_eq!(config.player_threshold, 0.25);
        assert_eq!(config.active_scorer, ScorerKind::Lexical);
        assert_eq!(config.banned_letters, vec!['q']);
        // Untouched fields keep their defaults.
        assert_eq!(config.base_similarity_threshold, 0.2);
        assert!(config.common_words.contains("cat"));
    }

    #[test]
    fn test_relation_weight_ordering() {
        let config = GameConfig::default();
        assert!(config.synonym_weight > config.hyponym_weight);
        assert!(config.hyponym_weight > config.sister_weight);
    }

    #[test]
    fn test_malformed_toml() {
        assert!(GameConfig::from_toml_str("player_threshold = \"high\"").is_err());
    }
}
