//! Generator Integration Tests
//!
//! Drives the full generation pipeline against a scripted backend:
//! - strict-parse passthrough (including out-of-taxonomy labels)
//! - lenient text salvage when the output is not JSON
//! - hard-failure fallback when the backend errors or returns nothing
//! - totality over empty input and empty history

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use insight_engine::{ConversationTurn, EmotionLabel, QuestionGenerator};
use insight_llm::{
    LlmError, LlmProvider, LlmRequestOptions, LlmResponse, LlmResult, Message, ProviderConfig,
    StopReason, UsageStats,
};

// ============================================================================
// Scripted mock provider
// ============================================================================

struct RecordedRequest {
    messages: Vec<Message>,
    system: Option<String>,
    options: LlmRequestOptions,
}

struct ScriptedProvider {
    config: ProviderConfig,
    reply: Result<String, LlmError>,
    last_request: Mutex<Option<RecordedRequest>>,
}

impl ScriptedProvider {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            config: ProviderConfig::default(),
            reply: Ok(text.to_string()),
            last_request: Mutex::new(None),
        })
    }

    fn failing(error: LlmError) -> Arc<Self> {
        Arc::new(Self {
            config: ProviderConfig::default(),
            reply: Err(error),
            last_request: Mutex::new(None),
        })
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_message(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        *self.last_request.lock().unwrap() = Some(RecordedRequest {
            messages,
            system,
            options: request_options,
        });
        match &self.reply {
            Ok(text) => Ok(LlmResponse {
                content: Some(text.clone()),
                stop_reason: StopReason::EndTurn,
                usage: UsageStats::default(),
                model: self.config.model.clone(),
            }),
            Err(error) => Err(error.clone()),
        }
    }

    async fn health_check(&self) -> LlmResult<()> {
        Ok(())
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

fn sample_history() -> Vec<ConversationTurn> {
    vec![
        ConversationTurn::new("What do you do?", "I build rockets"),
        ConversationTurn::new("Which rockets?", "Small sounding rockets"),
    ]
}

// ============================================================================
// Strict-parse path
// ============================================================================

#[tokio::test]
async fn test_strict_parse_passthrough() {
    let provider =
        ScriptedProvider::replying(r#"{"question": "Why so?", "emotional_state": "curious"}"#);
    let generator = QuestionGenerator::new(provider);

    let result = generator
        .generate_next_question_and_emotion(&[], "I like rockets")
        .await;

    assert_eq!(result.question, "Why so?");
    // Out-of-taxonomy labels survive the strict path unmodified
    assert_eq!(
        result.emotional_state,
        EmotionLabel::Other("curious".to_string())
    );
}

#[tokio::test]
async fn test_strict_parse_fenced_json() {
    let provider = ScriptedProvider::replying(
        "```json\n{\"question\": \"What payloads?\", \"emotional_state\": \"excited\"}\n```",
    );
    let generator = QuestionGenerator::new(provider);

    let result = generator
        .generate_next_question_and_emotion(&sample_history(), "They fly so high, wow")
        .await;

    assert_eq!(result.question, "What payloads?");
    assert_eq!(result.emotional_state, EmotionLabel::Excited);
}

#[tokio::test]
async fn test_strict_parse_missing_emotion_runs_classifier() {
    let provider = ScriptedProvider::replying(r#"{"question": "What worries you most?"}"#);
    let generator = QuestionGenerator::new(provider);

    let result = generator
        .generate_next_question_and_emotion(&[], "I'm worried about the budget")
        .await;

    assert_eq!(result.question, "What worries you most?");
    assert_eq!(result.emotional_state, EmotionLabel::Anxious);
}

// ============================================================================
// Lenient-salvage path
// ============================================================================

#[tokio::test]
async fn test_lenient_salvage_takes_first_line() {
    let provider = ScriptedProvider::replying("What drives you?\nnot json");
    let generator = QuestionGenerator::new(provider);

    let result = generator
        .generate_next_question_and_emotion(&[], "so much is unclear right now")
        .await;

    assert_eq!(result.question, "What drives you?");
    // Lenient path always classifies the user's response heuristically
    assert_eq!(result.emotional_state, EmotionLabel::Confused);
}

#[tokio::test]
async fn test_lenient_salvage_missing_question_key() {
    // Valid JSON without a usable question still degrades to salvage
    let provider = ScriptedProvider::replying(r#"{"emotional_state": "excited"}"#);
    let generator = QuestionGenerator::new(provider);

    let result = generator
        .generate_next_question_and_emotion(&[], "plain answer")
        .await;

    assert!(!result.question.is_empty());
    assert_eq!(result.emotional_state, EmotionLabel::Neutral);
}

// ============================================================================
// Hard-failure path
// ============================================================================

#[tokio::test]
async fn test_backend_failure_yields_fallback_question() {
    let provider = ScriptedProvider::failing(LlmError::NetworkError {
        message: "connection refused".to_string(),
    });
    let generator = QuestionGenerator::new(provider);

    let result = generator
        .generate_next_question_and_emotion(&[], "This is amazing and wild")
        .await;

    // Hard failure always reports neutral, even for excited wording
    assert_eq!(result.emotional_state, EmotionLabel::Neutral);
    assert!(result.question.contains("This is amazing"));
    assert!(!result.question.contains("wild"));
}

#[tokio::test]
async fn test_backend_failure_with_empty_response() {
    let provider = ScriptedProvider::failing(LlmError::ServerError {
        message: "overloaded".to_string(),
        status: Some(529),
    });
    let generator = QuestionGenerator::new(provider);

    let result = generator.generate_next_question_and_emotion(&[], "").await;

    assert!(!result.question.is_empty());
    assert_eq!(result.emotional_state, EmotionLabel::Neutral);
}

#[tokio::test]
async fn test_blank_backend_output_treated_as_failure() {
    let provider = ScriptedProvider::replying("   \n  ");
    let generator = QuestionGenerator::new(provider);

    let result = generator
        .generate_next_question_and_emotion(&[], "tell me something")
        .await;

    assert!(!result.question.is_empty());
    assert_eq!(result.emotional_state, EmotionLabel::Neutral);
}

// ============================================================================
// Request shape and no-mutation invariant
// ============================================================================

#[tokio::test]
async fn test_request_carries_transcript_and_budget() {
    let provider =
        ScriptedProvider::replying(r#"{"question": "Why?", "emotional_state": "neutral"}"#);
    let generator = QuestionGenerator::new(Arc::clone(&provider) as Arc<dyn LlmProvider>);

    let history = sample_history();
    generator
        .generate_next_question_and_emotion(&history, "They're cheap to launch")
        .await;

    let recorded = provider.last_request.lock().unwrap();
    let request = recorded.as_ref().expect("request was sent");

    // Single-turn user framing with a bounded output budget
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.options.max_tokens_override, Some(300));
    assert!(request.system.as_deref().unwrap().contains("emotional_state"));

    let user_message = &request.messages[0].content;
    assert!(user_message.contains("Q: What do you do?"));
    assert!(user_message.contains("A: Small sounding rockets"));
    assert!(user_message.contains("They're cheap to launch"));
}

#[tokio::test]
async fn test_history_is_not_mutated() {
    let provider = ScriptedProvider::replying("not json\nat all");
    let generator = QuestionGenerator::new(provider);

    let history = sample_history();
    let before = history.clone();

    generator
        .generate_next_question_and_emotion(&history, "An answer")
        .await;

    assert_eq!(history, before);
}
