//! Conversation ledger - the ordered record of every word spoken.
//!
//! The ledger owns an arena of [`WordEntry`] values chained by integer
//! indices, a reverse index from word text to occurrences, and the set of
//! distinct participant words used for duplicate rejection. It is created
//! once per game session and mutated only through [`ConversationLedger::append`]
//! and [`ConversationLedger::reset`].

mod entry;

pub use entry::*;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Append-only, time-ordered record of one conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationLedger {
    session_id: Uuid,
    entries: Vec<WordEntry>,

    /// Index: lowercased word text -> ordered entry indices.
    word_index: HashMap<String, Vec<usize>>,

    /// Distinct participant words, for duplicate rejection.
    participant_words: HashSet<String>,

    /// Arena index of the most recent entry.
    last: Option<usize>,
}

impl ConversationLedger {
    /// Create an empty ledger for a new game session.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            entries: Vec::new(),
            word_index: HashMap::new(),
            participant_words: HashSet::new(),
            last: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Append a spoken word, linking it to the prior entry.
    ///
    /// Returns the arena index of the new entry.
    pub fn append(&mut self, word: &str, speaker: Speaker) -> usize {
        let text = word.to_lowercase();
        let index = self.entries.len();

        if let Some(prev) = self.last {
            self.entries[prev].next = Some(index);
        }

        self.entries.push(WordEntry {
            text: text.clone(),
            speaker,
            sequence_index: index,
            timestamp: chrono::Utc::now(),
            previous: self.last,
            next: None,
        });

        self.word_index.entry(text.clone()).or_default().push(index);
        if speaker == Speaker::Participant {
            self.participant_words.insert(text);
        }
        self.last = Some(index);
        index
    }

    /// Discard all entries and indices, keeping the session id.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.word_index.clear();
        self.participant_words.clear();
        self.last = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an entry by arena index.
    pub fn entry(&self, index: usize) -> Option<&WordEntry> {
        self.entries.get(index)
    }

    /// The most recent entry, regardless of speaker.
    pub fn last_entry(&self) -> Option<&WordEntry> {
        self.last.and_then(|i| self.entries.get(i))
    }

    /// Whether a word has ever been spoken, by anyone.
    pub fn contains(&self, word: &str) -> bool {
        self.word_index.contains_key(&word.to_lowercase())
    }

    /// Ordered arena indices of every occurrence of a word.
    pub fn occurrences(&self, word: &str) -> &[usize] {
        self.word_index
            .get(&word.to_lowercase())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the participant already played this word.
    pub fn is_participant_duplicate(&self, word: &str) -> bool {
        self.participant_words.contains(&word.to_lowercase())
    }

    /// The most recent word spoken by the given speaker.
    pub fn last_word_by(&self, speaker: Speaker) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.speaker == speaker)
            .map(|e| e.text.as_str())
    }

    /// The last two words spoken, oldest first.
    pub fn current_pair(&self) -> Option<(&str, &str)> {
        let last = self.last_entry()?;
        let prev = last.previous.and_then(|i| self.entries.get(i))?;
        Some((prev.text.as_str(), last.text.as_str()))
    }

    /// All words spoken by the given speaker, in order.
    pub fn words_by(&self, speaker: Speaker) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.speaker == speaker)
            .map(|e| e.text.as_str())
            .collect()
    }

    /// Iterate over all entries in conversation order.
    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.entries.iter()
    }
}

impl Default for ConversationLedger {
    fn default() -> Self {
        Self::new()
    }
}
