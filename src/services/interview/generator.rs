//! Question/Emotion Generator
//!
//! The generation pipeline: build the prompt from conversation state, invoke
//! the generative backend, parse the output strictly, then leniently, and
//! degrade to a deterministic fallback when neither works. The public call
//! never fails: every error path resolves into a valid result before
//! returning.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use insight_core::error::{CoreError, CoreResult};
use insight_llm::{
    AnthropicProvider, LlmError, LlmProvider, LlmRequestOptions, Message, ProviderConfig,
};

use super::emotion::classify;
use super::prompt;
use crate::models::conversation::{ConversationTurn, EmotionLabel, GenerationResult};

/// Output-length budget for one generated question/emotion pair.
const RESPONSE_TOKEN_BUDGET: u32 = 300;

/// Generates the next interview question and emotional-state label.
///
/// Stateless aside from the backend handle fixed at construction; each call
/// is independent, so one generator can serve many conversations.
pub struct QuestionGenerator {
    provider: Arc<dyn LlmProvider>,
}

impl QuestionGenerator {
    /// Create a generator over an existing backend provider.
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Create a generator backed by the Anthropic Claude API.
    pub fn from_config(config: ProviderConfig) -> Self {
        Self::new(Arc::new(AnthropicProvider::new(config)))
    }

    /// Generate the next question and emotional state for a conversation.
    ///
    /// `history` is read-only; the engine never mutates or retains it. The
    /// returned result is always fully populated: backend failures produce a
    /// generic clarifying question with a neutral label, and unparseable
    /// backend output is salvaged from raw text.
    pub async fn generate_next_question_and_emotion(
        &self,
        history: &[ConversationTurn],
        user_response: &str,
    ) -> GenerationResult {
        let outcome = self.attempt_generation(history, user_response).await;
        resolve_outcome(outcome, user_response)
    }

    /// Run steps 1-3 of the pipeline, reporting the outcome as a value.
    async fn attempt_generation(
        &self,
        history: &[ConversationTurn],
        user_response: &str,
    ) -> GenerationOutcome {
        let system = prompt::build_interviewer_system_prompt();
        let user_message = prompt::build_user_message(history, user_response);

        let options = LlmRequestOptions {
            max_tokens_override: Some(RESPONSE_TOKEN_BUDGET),
            ..Default::default()
        };

        debug!(
            turn_count = history.len(),
            model = %self.provider.model(),
            "generating next question"
        );

        let response = match self
            .provider
            .send_message(vec![Message::user(user_message)], Some(system), options)
            .await
        {
            Ok(response) => response,
            Err(error) => return GenerationOutcome::BackendFailure { error },
        };

        let Some(raw) = response.text() else {
            return GenerationOutcome::BackendFailure {
                error: LlmError::ParseError {
                    message: "backend returned empty output".to_string(),
                },
            };
        };

        match parse_strict(raw, user_response) {
            Ok(result) => GenerationOutcome::Success(result),
            Err(e) => {
                debug!(error = %e, "strict parse failed, salvaging from raw text");
                GenerationOutcome::ParseFailure {
                    raw: raw.trim().to_string(),
                }
            }
        }
    }
}

/// Outcome of one generation attempt, resolved internally before returning.
enum GenerationOutcome {
    /// Backend produced a usable question (and possibly a label)
    Success(GenerationResult),
    /// Backend responded but the output was not machine-readable
    ParseFailure { raw: String },
    /// The backend call itself failed
    BackendFailure { error: LlmError },
}

/// Fields the backend is instructed to return. Both optional so that partial
/// objects still surface as typed values rather than parse errors.
#[derive(Deserialize)]
struct ParsedGeneration {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    emotional_state: Option<String>,
}

/// Tier-1 strict parse: JSON object with a non-empty `question`.
///
/// A missing `emotional_state` is not fatal (the heuristic classifier
/// covers it), but a missing or empty `question` fails the tier.
fn parse_strict(raw: &str, user_response: &str) -> CoreResult<GenerationResult> {
    let json_str = extract_json_from_response(raw);
    let parsed: ParsedGeneration = serde_json::from_str(&json_str)?;

    let question = parsed
        .question
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| CoreError::validation("backend output has no question field"))?;

    let emotional_state = match parsed.emotional_state.filter(|s| !s.trim().is_empty()) {
        Some(label) => EmotionLabel::from(label.as_str()),
        None => classify(user_response),
    };

    Ok(GenerationResult {
        question,
        emotional_state,
    })
}

/// Resolve an outcome into the guaranteed result.
fn resolve_outcome(outcome: GenerationOutcome, user_response: &str) -> GenerationResult {
    match outcome {
        GenerationOutcome::Success(result) => result,
        GenerationOutcome::ParseFailure { raw } => {
            warn!("backend output not machine-readable, using lenient fallback");
            lenient_fallback(&raw, user_response)
        }
        GenerationOutcome::BackendFailure { error } => {
            warn!(error = %error, "backend call failed, using fallback question");
            hard_fallback(user_response)
        }
    }
}

/// Tier-2 lenient fallback: first line of the raw output as the question,
/// emotional state from the heuristic classifier.
fn lenient_fallback(raw: &str, user_response: &str) -> GenerationResult {
    let first_line = raw.lines().next().map(str::trim).unwrap_or_default();
    if first_line.is_empty() {
        // Nothing salvageable in the output
        return hard_fallback(user_response);
    }
    GenerationResult {
        question: first_line.to_string(),
        emotional_state: classify(user_response),
    }
}

/// Hard-failure fallback: a generic clarifying question echoing the start of
/// the user's response, with a neutral label. Total over any input,
/// including the empty string.
fn hard_fallback(user_response: &str) -> GenerationResult {
    let preview = user_response
        .split_whitespace()
        .take(3)
        .collect::<Vec<_>>()
        .join(" ");
    GenerationResult {
        question: format!(
            "I'm intrigued by your response. Could you tell me more about {}?",
            preview
        ),
        emotional_state: EmotionLabel::Neutral,
    }
}

/// Extract JSON from an LLM response string, handling markdown fences.
fn extract_json_from_response(text: &str) -> String {
    let trimmed = text.trim();

    // Try markdown code fences
    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        let content_start = if let Some(nl) = after_fence.find('\n') {
            nl + 1
        } else {
            0
        };
        let content = &after_fence[content_start..];
        if let Some(end) = content.find("```") {
            return content[..end].trim().to_string();
        }
    }

    // Try JSON object { ... }
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start <= end {
            return trimmed[start..=end].to_string();
        }
    }

    trimmed.to_string()
}
