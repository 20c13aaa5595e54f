//! Response types - the closed set of turn outcomes and the wire shape
//! returned to the service layer.

use serde::{Deserialize, Serialize};

use crate::ledger::WordEntry;

/// Terminal outcome of one engine turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseCode {
    /// Empty or whitespace-only input.
    Empty,
    /// The ledger was cleared on request.
    Reset,
    /// The word starts with a banned letter.
    Rts,
    /// The word failed validation for any other reason.
    InvalidWord,
    /// The participant already played this word.
    Duplicate,
    /// The word equals the engine's last word.
    SameWord,
    /// The word is a trivial variant of the engine's last word.
    TooSimilar,
    /// The word was unrelated; the engine replied with a bridge word.
    Unrelated,
    /// No admissible candidate could be found.
    NoRelation,
    /// The word was accepted and the engine replied.
    Related,
    /// An unexpected internal failure.
    Error,
}

impl ResponseCode {
    /// Whether this outcome registers a trainable engine turn (i.e. the
    /// engine's suggestion was appended to the ledger).
    pub fn is_trainable(&self) -> bool {
        matches!(self, ResponseCode::Unrelated | ResponseCode::Related)
    }

    /// Reply template for outcomes that carry no suggestion. `{word}` and
    /// `{last_word}` are substituted by [`EngineResponse::templated`].
    pub fn message_template(&self) -> &'static str {
        match self {
            ResponseCode::Empty => "?",
            ResponseCode::Reset => "alright, give me a word",
            ResponseCode::Rts => "rts",
            ResponseCode::InvalidWord => "doesn't count",
            ResponseCode::Duplicate => "we used {word} already",
            ResponseCode::SameWord => "we just used {word}",
            ResponseCode::TooSimilar => "isn't {word} too similar to {last_word}?",
            ResponseCode::Unrelated | ResponseCode::Related => "",
            ResponseCode::NoRelation => "new word pls?",
            ResponseCode::Error => "?",
        }
    }
}

/// One turn's reply, in the shape the service layer serializes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineResponse {
    pub response: String,
    pub train_of_thought: Vec<Vec<String>>,
    pub response_code: ResponseCode,
}

impl EngineResponse {
    /// A reply with the code's template verbatim and no reasoning trace.
    pub fn plain(code: ResponseCode) -> Self {
        Self {
            response: code.message_template().to_string(),
            train_of_thought: Vec::new(),
            response_code: code,
        }
    }

    /// A reply with the code's template, substituting the offending word
    /// and the engine's last word where the template names them.
    pub fn templated(code: ResponseCode, word: &str, last_word: &str) -> Self {
        Self {
            response: code
                .message_template()
                .replace("{word}", word)
                .replace("{last_word}", last_word),
            train_of_thought: Vec::new(),
            response_code: code,
        }
    }

    /// A suggestion reply carrying the reasoning trace.
    pub fn suggestion(
        code: ResponseCode,
        word: impl Into<String>,
        train_of_thought: Vec<Vec<String>>,
    ) -> Self {
        Self {
            response: word.into(),
            train_of_thought,
            response_code: code,
        }
    }
}

/// Read-only ledger dump for the debug surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub conversation_history: Vec<WordEntry>,
    pub total_words: usize,
    pub user_words: Vec<String>,
    pub current_pair: Option<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trainable_codes() {
        assert!(ResponseCode::Related.is_trainable());
        assert!(ResponseCode::Unrelated.is_trainable());
        assert!(!ResponseCode::Duplicate.is_trainable());
        assert!(!ResponseCode::NoRelation.is_trainable());
        assert!(!ResponseCode::Error.is_trainable());
    }

    #[test]
    fn test_code_serialization() {
        assert_eq!(
            serde_json::to_string(&ResponseCode::InvalidWord).unwrap(),
            "\"INVALID_WORD\""
        );
        assert_eq!(
            serde_json::to_string(&ResponseCode::Rts).unwrap(),
            "\"RTS\""
        );
        let parsed: ResponseCode = serde_json::from_str("\"NO_RELATION\"").unwrap();
        assert_eq!(parsed, ResponseCode::NoRelation);
    }

    #[test]
    fn test_plain_response_uses_template() {
        let response = EngineResponse::plain(ResponseCode::NoRelation);
        assert_eq!(response.response, "new word pls?");
        assert!(response.train_of_thought.is_empty());
    }

    #[test]
    fn test_templated_response_substitutes_words() {
        let response = EngineResponse::templated(ResponseCode::Duplicate, "dog", "");
        assert_eq!(response.response, "we used dog already");

        let response = EngineResponse::templated(ResponseCode::TooSimilar, "dogs", "dog");
        assert_eq!(response.response, "isn't dogs too similar to dog?");
    }
}
