//! Heuristic Emotion Classifier
//!
//! Keyword-based fallback used when the backend does not supply a usable
//! emotional-state label.

use crate::models::conversation::EmotionLabel;

const EXCITEMENT_KEYWORDS: [&str; 5] = ["wow", "amazing", "excited", "fantastic", "awesome"];
const ANXIETY_KEYWORDS: [&str; 5] = ["worried", "concerned", "nervous", "uncertain", "scared"];
const CONFUSION_KEYWORDS: [&str; 4] = ["confused", "unclear", "don't understand", "what do you mean"];

/// Classify the emotional undertone of a response.
///
/// Case-insensitive substring matching against fixed keyword sets, checked
/// in priority order: excitement, then anxiety, then confusion. The ordering
/// is part of the contract; a response matching several sets takes the
/// highest-priority label. Anything else (including empty input) is neutral.
pub fn classify(text: &str) -> EmotionLabel {
    let lowered = text.to_lowercase();

    if EXCITEMENT_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        EmotionLabel::Excited
    } else if ANXIETY_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        EmotionLabel::Anxious
    } else if CONFUSION_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        EmotionLabel::Confused
    } else {
        EmotionLabel::Neutral
    }
}
