//! Chat-completion contract implemented by provider adapters
//!
//! The library ships no concrete adapters; hosting applications implement
//! [`LlmGateway`] for whichever provider they talk to. The broker is written
//! against this trait only, which is what lets the event subsystem trace any
//! provider uniformly.

use crate::error::Result;
use crate::llm::models::{LlmMessage, LlmResponse};
use crate::llm::tools::LlmTool;
use async_trait::async_trait;
use serde_json::Value;

/// Configuration for an LLM completion request
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub temperature: f32,
    pub max_tokens: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            max_tokens: 16384,
        }
    }
}

/// Abstract interface for chat-completion providers
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Complete a conversation with a text (and possibly tool-call) response
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: &CompletionConfig,
    ) -> Result<LlmResponse>;

    /// Complete a conversation with a structured JSON response conforming to
    /// the given schema
    async fn complete_json(
        &self,
        model: &str,
        messages: &[LlmMessage],
        schema: Value,
        config: &CompletionConfig,
    ) -> Result<Value>;
}
