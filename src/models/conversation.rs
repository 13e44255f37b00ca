//! Conversation Models
//!
//! Data types exchanged with the interview engine: the caller-owned
//! conversation history, the emotional-state vocabulary, and the per-call
//! generation result.

use serde::{Deserialize, Serialize};

/// One asked-question / given-answer exchange in the conversation history.
///
/// Order-significant and immutable once appended by the caller; the engine
/// only ever reads these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// The question that was asked
    pub question: String,
    /// The answer the user gave
    pub answer: String,
}

impl ConversationTurn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Emotional-state classification of a user response.
///
/// The heuristic classifier only ever produces the four closed variants;
/// labels reported by the backend outside that vocabulary survive as
/// `Other` verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmotionLabel {
    Excited,
    Anxious,
    Confused,
    Neutral,
    /// A backend-supplied label outside the closed vocabulary
    Other(String),
}

impl EmotionLabel {
    /// The label as its wire string.
    pub fn as_str(&self) -> &str {
        match self {
            EmotionLabel::Excited => "excited",
            EmotionLabel::Anxious => "anxious",
            EmotionLabel::Confused => "confused",
            EmotionLabel::Neutral => "neutral",
            EmotionLabel::Other(label) => label,
        }
    }
}

impl From<&str> for EmotionLabel {
    fn from(s: &str) -> Self {
        match s {
            "excited" => EmotionLabel::Excited,
            "anxious" => EmotionLabel::Anxious,
            "confused" => EmotionLabel::Confused,
            "neutral" => EmotionLabel::Neutral,
            other => EmotionLabel::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Labels cross the API boundary as plain strings, not tagged variants.
impl Serialize for EmotionLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EmotionLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(EmotionLabel::from(s.as_str()))
    }
}

/// Result of one generation call: the next question to ask and the inferred
/// emotional state. Always fully populated; `question` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// The next question to ask the user
    pub question: String,
    /// The inferred emotional state of the user
    pub emotional_state: EmotionLabel,
}
