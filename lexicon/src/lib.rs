//! # Lexicon (The Word Book)
//!
//! The "word book" crate - contains the lexical knowledge graph, word
//! validation rules, and game configuration. This crate is the single source
//! of truth for what counts as a word and how words relate taxonomically;
//! it contains no game-session state.

pub mod config;
pub mod graph;
pub mod validate;

pub use config::*;
pub use graph::*;
pub use validate::*;

use thiserror::Error;

/// Errors raised while loading lexicon data or configuration.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed graph data: {0}")]
    Graph(#[from] serde_json::Error),

    #[error("malformed configuration: {0}")]
    Config(#[from] toml::de::Error),
}
