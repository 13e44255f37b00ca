//! Integration Tests Module
//!
//! End-to-end tests for the question/emotion generation pipeline, driven
//! through a scripted mock provider. No LLM calls are made.

// Generator pipeline tests (strict/lenient/hard-failure paths)
mod generator_test;
