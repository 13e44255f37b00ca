//! Interview Prompt Builder
//!
//! Builds the system prompt and the transcript-bearing user message for the
//! question/emotion generation step.

use crate::models::conversation::ConversationTurn;

/// Build the system prompt for the interviewer step.
///
/// Directs the backend to mine the latest response for key terms, deepen the
/// topic with one follow-up question, and classify the emotional undertone,
/// answering as a JSON object with exactly two keys.
pub fn build_interviewer_system_prompt() -> String {
    r#"You are an insightful conversation interviewer. Given the conversation so far and the user's latest response, you produce the next question to ask and an assessment of the user's emotional state.

## Rules
1. Extract key terms and themes from the user's latest response.
2. Create a question that:
   a) Builds directly on the user's previous input
   b) Uses specific terminology from their response
   c) Encourages deeper exploration of the topic
3. Assess the emotional undertones of the response and categorize the emotional state (e.g., excited, anxious, curious, confused), reflecting the user's tone, word choice, and implied sentiment.
4. Output ONLY valid JSON — no markdown fences, no explanatory text, no comments.

## Output Format
A JSON object with exactly two keys:
{"question": "Carefully crafted next question", "emotional_state": "detected emotional state"}"#
        .to_string()
}

/// Serialize the conversation history into a human-readable transcript,
/// order preserved.
pub fn build_transcript(history: &[ConversationTurn]) -> String {
    let mut transcript = String::new();
    for turn in history {
        transcript.push_str(&format!("\nQ: {}\nA: {}\n", turn.question, turn.answer));
    }
    transcript
}

/// Build the single user message carrying the transcript and the latest
/// response.
pub fn build_user_message(history: &[ConversationTurn], user_response: &str) -> String {
    let mut text = String::from("Conversation History:\n");
    if history.is_empty() {
        text.push_str("(none)\n");
    } else {
        text.push_str(&build_transcript(history));
    }
    text.push_str(&format!("\nLatest User Response:\n{}", user_response));
    text
}
