//! Lexical graph module - the taxonomy of word senses.
//!
//! The graph consists of:
//! - **Synsets**: one meaning of a word, with its lemmas and definition
//! - **Taxonomy edges**: hypernym (more general) / hyponym (more specific)
//! - **Lemma index**: lowercased word text -> senses containing it

mod lexical;
mod synset;

pub use lexical::*;
pub use synset::*;
