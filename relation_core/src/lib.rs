//! # Relation Core
//!
//! The "brain" of the word-association game. This crate interfaces with
//! `lexicon`, records every spoken word in an append-only conversation
//! ledger, learns pairwise word weights from feedback, and selects the
//! engine's reply word each turn.
//!
//! ## Core Components
//!
//! - **ledger**: Append-only, doubly-linked record of every word spoken
//! - **store**: Persisted pair weights and model blend coefficients
//! - **scorer**: Interchangeable lexical / trained / blended scoring
//! - **candidates**: Typed relation candidates from graph and store
//! - **engine**: The per-turn response state machine
//!
//! ## Design Philosophy
//!
//! - **Session-scoped**: One engine object per conversation; no process-wide
//!   mutable state
//! - **Rejections are data**: Expected outcomes are response codes, never
//!   errors; only storage and adapter failures propagate as `Err`
//! - **No partial turns**: The ledger is mutated only after a turn has fully
//!   decided its outcome

pub mod candidates;
pub mod engine;
pub mod ledger;
pub mod scorer;
pub mod store;

pub use candidates::*;
pub use engine::*;
pub use ledger::*;
pub use scorer::*;
pub use store::*;
