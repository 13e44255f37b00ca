//! Insight Core
//!
//! Foundational error and configuration types for the Insight interview
//! engine workspace. This crate has zero dependencies on application-level
//! code (LLM providers, HTTP clients, etc.).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `proxy` - Proxy configuration data types shared across workspace crates

pub mod error;
pub mod proxy;

pub use error::{CoreError, CoreResult};
pub use proxy::{ProxyConfig, ProxyProtocol};
