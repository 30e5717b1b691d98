//! Model client module for text completion
//!
//! This module provides:
//! - `client`: OpenAI-compatible completion client and the `CompletionApi` seam
//! - `mock`: Canned-response backend for tests and offline runs

mod client;
mod mock;

pub use client::{CompletionApi, CompletionRequest, ModelClient, ModelConfig, ModelResponse};
pub use mock::MockCompletion;
