//! Word validation rules - what counts as an admissible game word.
//!
//! Validation is pure: it consults the lexical graph but never mutates any
//! game state, so it is safe to call for lookahead checks on candidate words.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::graph::{LexicalGraph, PartOfSpeech};

/// Why a token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Nothing left after stripping non-alphabetic characters.
    NoLetters,
    /// The cleaned word starts with a banned letter (the game rule).
    BannedLetter,
    /// The lexical graph has no noun or adjective sense for the word.
    UnknownWord,
}

/// Validator for incoming game words.
#[derive(Debug, Clone)]
pub struct WordValidator {
    banned_letters: Vec<char>,
    enforce_banned_letters: bool,
}

impl WordValidator {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            banned_letters: config.banned_letters.clone(),
            enforce_banned_letters: config.enforce_banned_letters,
        }
    }

    /// Validate a token against the game rules.
    ///
    /// Returns the cleaned (lowercased, alphabetic-only) word on success.
    pub fn validate(&self, graph: &LexicalGraph, word: &str) -> Result<String, RejectReason> {
        let cleaned: String = word
            .chars()
            .filter(|c| c.is_alphabetic())
            .collect::<String>()
            .to_lowercase();

        if cleaned.is_empty() {
            return Err(RejectReason::NoLetters);
        }

        if self.enforce_banned_letters {
            let first = cleaned.chars().next().unwrap_or_default();
            if self.banned_letters.contains(&first) {
                return Err(RejectReason::BannedLetter);
            }
        }

        if graph.synsets_for_pos(&cleaned, PartOfSpeech::GAME_POS).is_empty() {
            return Err(RejectReason::UnknownWord);
        }

        Ok(cleaned)
    }
}

/// Suffix-stripping rules, applied in order: (suffix, replacement).
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("es", ""),
    ("ies", "y"),
    ("ing", ""),
    ("ed", ""),
    ("er", ""),
    ("est", ""),
];

/// Exact-variant test: true iff the lowercased words are identical, or
/// stripping one suffix rule from either side yields exact equality.
///
/// This is deliberately not a substring test; "cat" is not contained in
/// "category".
pub fn is_contained(word_a: &str, word_b: &str) -> bool {
    let a = word_a.to_lowercase();
    let b = word_b.to_lowercase();

    if a == b {
        return true;
    }

    for (suffix, replacement) in SUFFIX_RULES {
        if let Some(stem) = a.strip_suffix(suffix) {
            if format!("{stem}{replacement}") == b {
                return true;
            }
        }
        if let Some(stem) = b.strip_suffix(suffix) {
            if format!("{stem}{replacement}") == a {
                return true;
            }
        }
    }
    false
}
