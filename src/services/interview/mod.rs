//! Interview Service
//!
//! Generates the next interview question and an emotional-state label from
//! the conversation so far. The generation call never fails outward: backend
//! or parse problems degrade to deterministic fallbacks.
//!
//! - `generator` - the question/emotion generation pipeline
//! - `emotion` - keyword-based heuristic emotion classifier
//! - `prompt` - system prompt and transcript construction

pub mod emotion;
pub mod generator;
pub mod prompt;

pub use emotion::classify;
pub use generator::QuestionGenerator;
