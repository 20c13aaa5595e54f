//! Synset definitions - nodes in the lexical graph.

use serde::{Deserialize, Serialize};

/// Identifier for a synset: an index into the graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SynsetId(pub usize);

impl std::fmt::Display for SynsetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "synset:{}", self.0)
    }
}

/// Part of speech of a sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Adjective,
    Verb,
    Adverb,
}

impl PartOfSpeech {
    /// The parts of speech admissible as game words.
    pub const GAME_POS: &'static [PartOfSpeech] = &[PartOfSpeech::Noun, PartOfSpeech::Adjective];
}

/// One meaning of a word within the lexical knowledge base.
///
/// The `name` is the canonical sense name (e.g. `"dog.n.01"`), used to match
/// senses against configured concrete roots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Synset {
    pub id: SynsetId,
    pub name: String,
    pub pos: PartOfSpeech,

    /// Word forms for this sense; multi-word lemmas use `_` as separator.
    pub lemmas: Vec<String>,

    /// Gloss text, consulted by the concreteness heuristics.
    pub definition: String,

    /// More general senses.
    pub hypernyms: Vec<SynsetId>,

    /// More specific senses.
    pub hyponyms: Vec<SynsetId>,
}

impl Synset {
    /// The representative (first) lemma of this sense, if any.
    pub fn head_lemma(&self) -> Option<&str> {
        self.lemmas.first().map(|s| s.as_str())
    }

    /// Check whether a lowercased word is one of this sense's lemmas.
    pub fn has_lemma(&self, word: &str) -> bool {
        self.lemmas.iter().any(|l| l == word)
    }
}
