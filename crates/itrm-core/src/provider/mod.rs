//! LLM provider trait.
//!
//! The research agent talks to a model only through [`LlmProvider`], so
//! tests can script responses without a network. [`openai`] covers every
//! backend that speaks the OpenAI chat-completions protocol.

pub mod openai;
pub mod types;

use async_trait::async_trait;
use types::{ChatMessage, LlmResponse, ToolDefinition};

/// Sampling settings sent with each completion request.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    /// Model identifier override (None = provider default).
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: 2048,
            temperature: 0.2,
        }
    }
}

/// A chat-completion backend with tool calling.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one chat completion request.
    ///
    /// An empty `tools` slice disables tool calling for this request.
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
        settings: &CompletionSettings,
    ) -> anyhow::Result<LlmResponse>;

    fn default_model(&self) -> &str;
}
