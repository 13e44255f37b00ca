//! Insight LLM
//!
//! Generative text backend abstraction for the Insight interview engine:
//! the provider trait, request/response types, the Anthropic Claude
//! implementation, and the HTTP client factory.

pub mod anthropic;
pub mod http_client;
pub mod provider;
pub mod types;

// Re-export main types
pub use anthropic::AnthropicProvider;
pub use http_client::build_http_client;
pub use provider::LlmProvider;
pub use types::*;
