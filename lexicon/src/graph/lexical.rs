//! The lexical graph - arena of synsets with a lemma index.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

use super::{PartOfSpeech, Synset, SynsetId};
use crate::LexiconError;

/// The lexical knowledge graph.
///
/// Synsets live in a growable arena and refer to each other by `SynsetId`
/// index, so taxonomy traversal never deals in shared ownership. The lemma
/// index maps lowercased word text to every sense containing it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LexicalGraph {
    synsets: Vec<Synset>,

    /// Index: lowercased lemma -> senses containing it.
    lemma_index: HashMap<String, Vec<SynsetId>>,
}

impl LexicalGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a graph from its JSON serialization.
    pub fn from_json_str(data: &str) -> Result<Self, LexiconError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Load a graph from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Add a new synset and index its lemmas.
    ///
    /// Returns the synset id for linking.
    pub fn add_synset(
        &mut self,
        name: impl Into<String>,
        pos: PartOfSpeech,
        lemmas: &[&str],
        definition: impl Into<String>,
    ) -> SynsetId {
        let id = SynsetId(self.synsets.len());
        let lemmas: Vec<String> = lemmas.iter().map(|l| l.to_lowercase()).collect();

        for lemma in &lemmas {
            self.lemma_index.entry(lemma.clone()).or_default().push(id);
        }

        self.synsets.push(Synset {
            id,
            name: name.into(),
            pos,
            lemmas,
            definition: definition.into(),
            hypernyms: Vec::new(),
            hyponyms: Vec::new(),
        });
        id
    }

    /// Link a child sense to its hypernym, keeping both edge lists consistent.
    pub fn link_hypernym(&mut self, child: SynsetId, parent: SynsetId) {
        if !self.synsets[child.0].hypernyms.contains(&parent) {
            self.synsets[child.0].hypernyms.push(parent);
        }
        if !self.synsets[parent.0].hyponyms.contains(&child) {
            self.synsets[parent.0].hyponyms.push(child);
        }
    }

    /// Get a synset by id.
    pub fn synset(&self, id: SynsetId) -> Option<&Synset> {
        self.synsets.get(id.0)
    }

    /// All senses of a lowercased word, any part of speech.
    pub fn synsets_for(&self, word: &str) -> Vec<&Synset> {
        self.lemma_index
            .get(&word.to_lowercase())
            .map(|ids| ids.iter().filter_map(|id| self.synset(*id)).collect())
            .unwrap_or_default()
    }

    /// Senses of a word restricted to the given parts of speech.
    pub fn synsets_for_pos(&self, word: &str, pos: &[PartOfSpeech]) -> Vec<&Synset> {
        self.synsets_for(word)
            .into_iter()
            .filter(|s| pos.contains(&s.pos))
            .collect()
    }

    /// Check if a word resolves to at least one sense.
    pub fn contains_word(&self, word: &str) -> bool {
        self.lemma_index.contains_key(&word.to_lowercase())
    }

    /// The total number of synsets.
    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    /// Path similarity between two senses: `1 / (1 + d)` where `d` is the
    /// shortest taxonomy path between them, or `None` when no path exists.
    pub fn path_similarity(&self, a: SynsetId, b: SynsetId) -> Option<f32> {
        self.taxonomy_distance(a, b).map(|d| 1.0 / (1.0 + d as f32))
    }

    /// Maximum path similarity over all sense pairs of two words, restricted
    /// to the given parts of speech. Returns 0.0 when either word has no
    /// senses or no sense pair is connected.
    pub fn max_pair_similarity(&self, word_a: &str, word_b: &str, pos: &[PartOfSpeech]) -> f32 {
        let senses_a = self.synsets_for_pos(word_a, pos);
        let senses_b = self.synsets_for_pos(word_b, pos);

        let mut best = 0.0f32;
        for sa in &senses_a {
            for sb in &senses_b {
                if let Some(sim) = self.path_similarity(sa.id, sb.id) {
                    best = best.max(sim);
                }
            }
        }
        best
    }

    /// Check whether any hypernym ancestor of `id` (including `id` itself)
    /// carries one of the given sense names.
    pub fn has_ancestor_in(&self, id: SynsetId, roots: &HashSet<String>) -> bool {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([id]);

        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            let Some(synset) = self.synset(current) else {
                continue;
            };
            if roots.contains(&synset.name) {
                return true;
            }
            queue.extend(&synset.hypernyms);
        }
        false
    }

    /// Concrete-noun heuristic: a word is concrete when one of its noun
    /// senses has a definition free of abstract keywords and either mentions
    /// a concrete indicator or descends from a configured concrete root.
    pub fn is_concrete_noun(&self, word: &str, config: &crate::config::GameConfig) -> bool {
        for synset in self.synsets_for_pos(word, &[PartOfSpeech::Noun]) {
            let definition = synset.definition.to_lowercase();

            if config
                .abstract_keywords
                .iter()
                .any(|k| definition.contains(k.as_str()))
            {
                continue;
            }
            if config
                .concrete_indicators
                .iter()
                .any(|k| definition.contains(k.as_str()))
            {
                return true;
            }
            if self.has_ancestor_in(synset.id, &config.concrete_roots) {
                return true;
            }
        }
        false
    }

    /// Breadth-first shortest path length over taxonomy edges, both
    /// directions. Bounded by the arena size, so always terminates.
    fn taxonomy_distance(&self, a: SynsetId, b: SynsetId) -> Option<usize> {
        if a == b {
            return Some(0);
        }

        let mut seen = HashSet::from([a]);
        let mut queue = VecDeque::from([(a, 0usize)]);

        while let Some((current, dist)) = queue.pop_front() {
            let synset = self.synset(current)?;
            for next in synset.hypernyms.iter().chain(&synset.hyponyms) {
                if *next == b {
                    return Some(dist + 1);
                }
                if seen.insert(*next) {
                    queue.push_back((*next, dist + 1));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal_graph() -> LexicalGraph {
        let mut graph = LexicalGraph::new();

        let animal = graph.add_synset(
            "animal.n.01",
            PartOfSpeech::Noun,
            &["animal", "creature"],
            "a living organism",
        );
        let canine = graph.add_synset(
            "canine.n.02",
            PartOfSpeech::Noun,
            &["canine"],
            "a dog-like mammal",
        );
        let feline = graph.add_synset(
            "feline.n.01",
            PartOfSpeech::Noun,
            &["feline"],
            "a cat-like mammal",
        );
        let dog = graph.add_synset(
            "dog.n.01",
            PartOfSpeech::Noun,
            &["dog", "domestic_dog"],
            "a domesticated animal kept as a pet",
        );
        let cat = graph.add_synset(
            "cat.n.01",
            PartOfSpeech::Noun,
            &["cat"],
            "a small domesticated animal",
        );

        graph.link_hypernym(canine, animal);
        graph.link_hypernym(feline, animal);
        graph.link_hypernym(dog, canine);
        graph.link_hypernym(cat, feline);

        graph
    }

    #[test]
    fn test_lemma_lookup() {
        let graph = animal_graph();

        assert!(graph.contains_word("dog"));
        assert!(graph.contains_word("DOG"));
        assert!(!graph.contains_word("rocket"));

        let senses = graph.synsets_for("dog");
        assert_eq!(senses.len(), 1);
        assert_eq!(senses[0].name, "dog.n.01");
    }

    #[test]
    fn test_pos_filter() {
        let mut graph = animal_graph();
        graph.add_synset("fast.a.01", PartOfSpeech::Adjective, &["fast"], "quick");

        assert_eq!(graph.synsets_for_pos("fast", &[PartOfSpeech::Noun]).len(), 0);
        assert_eq!(
            graph
                .synsets_for_pos("fast", &[PartOfSpeech::Adjective])
                .len(),
            1
        );
    }

    #[test]
    fn test_path_similarity() {
        let graph = animal_graph();
        let dog = graph.synsets_for("dog")[0].id;
        let canine = graph.synsets_for("canine")[0].id;
        let cat = graph.synsets_for("cat")[0].id;

        // Direct hypernym: distance 1.
        assert_eq!(graph.path_similarity(dog, canine), Some(0.5));
        // dog -> canine -> animal -> feline -> cat: distance 4.
        assert_eq!(graph.path_similarity(dog, cat), Some(0.2));
        // Identity.
        assert_eq!(graph.path_similarity(dog, dog), Some(1.0));
    }

    #[test]
    fn test_path_similarity_disconnected() {
        let mut graph = animal_graph();
        let rock = graph.add_synset("pebble.n.01", PartOfSpeech::Noun, &["pebble"], "a stone");
        let dog = graph.synsets_for("dog")[0].id;

        assert_eq!(graph.path_similarity(dog, rock), None);
        assert_eq!(graph.max_pair_similarity("dog", "pebble", PartOfSpeech::GAME_POS), 0.0);
    }

    #[test]
    fn test_max_pair_similarity() {
        let graph = animal_graph();

        let sim = graph.max_pair_similarity("dog", "canine", PartOfSpeech::GAME_POS);
        assert!((sim - 0.5).abs() < f32::EPSILON);

        // No senses at all.
        assert_eq!(graph.max_pair_similarity("dog", "zzz", PartOfSpeech::GAME_POS), 0.0);
    }

    #[test]
    fn test_ancestor_roots() {
        let graph = animal_graph();
        let dog = graph.synsets_for("dog")[0].id;

        let roots = HashSet::from(["animal.n.01".to_string()]);
        assert!(graph.has_ancestor_in(dog, &roots));

        let other = HashSet::from(["artifact.n.01".to_string()]);
        assert!(!graph.has_ancestor_in(dog, &other));
    }

    #[test]
    fn test_concrete_noun() {
        use crate::config::GameConfig;

        let graph = animal_graph();
        let config = GameConfig::default();

        // "dog" descends from animal.n.01, a configured concrete root, and
        // its definition mentions "animal", a concrete indicator.
        assert!(graph.is_concrete_noun("dog", &config));
        assert!(!graph.is_concrete_noun("nonexistent", &config));
    }

    #[test]
    fn test_abstract_definition_skipped() {
        use crate::config::GameConfig;

        let mut graph = LexicalGraph::new();
        graph.add_synset(
            "hope.n.01",
            PartOfSpeech::Noun,
            &["optimism"],
            "a feeling of expectation",
        );

        let config = GameConfig::default();
        assert!(!graph.is_concrete_noun("optimism", &config));
    }

    #[test]
    fn test_json_round_trip() {
        let graph = animal_graph();
        let json = serde_json::to_string(&graph).unwrap();
        let restored = LexicalGraph::from_json_str(&json).unwrap();

        assert_eq!(restored.synset_count(), graph.synset_count());
        assert!(restored.contains_word("dog"));
        let dog = restored.synsets_for("dog")[0].id;
        let canine = restored.synsets_for("canine")[0].id;
        assert_eq!(restored.path_similarity(dog, canine), Some(0.5));
    }
}
