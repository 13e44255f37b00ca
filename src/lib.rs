//! Insight Engine
//!
//! Core library for the Insight conversational interview engine. Given the
//! conversation so far and the user's latest response, it produces the next
//! question to ask and an inferred emotional-state label, delegating to a
//! generative text backend with deterministic fallbacks.
//!
//! The HTTP/route layer lives outside this library; callers supply
//! `(history, user_response)` per call and own all conversation state.

pub mod models;
pub mod services;

pub use models::conversation::{ConversationTurn, EmotionLabel, GenerationResult};
pub use services::interview::{classify, QuestionGenerator};
