//! Search-augmented research agent.
//!
//! [`ResearchAgent`] is the single seam the product handler depends on:
//! a natural-language question in, natural-language text out. The
//! production implementation, [`SearchAgent`], runs a short tool loop:
//! 1. Sends the system prompt and the user's question to the LLM
//! 2. If the LLM asks for `web_search`, runs it and feeds the results back
//! 3. Returns the first plain-text answer
//!
//! The loop is bounded by `max_iterations`; running out is an error.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::AgentError;
use crate::provider::types::ChatMessage;
use crate::provider::{CompletionSettings, LlmProvider};
use crate::tools::ToolRegistry;

const SYSTEM_PROMPT: &str = "You are an IT procurement analyst helping an IT finance team. \
Use the web_search tool to find current information about the products the user names. \
Answer with a short comparison covering cost, performance, and notable trade-offs. \
Name vendors explicitly.";

/// An opaque, fallible question-answering collaborator.
#[async_trait]
pub trait ResearchAgent: Send + Sync {
    async fn ask(&self, query: &str) -> Result<String, AgentError>;
}

/// Tool-loop settings for [`SearchAgent`].
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub completion: CompletionSettings,
    pub max_iterations: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            completion: CompletionSettings::default(),
            max_iterations: 6,
        }
    }
}

pub struct SearchAgent {
    provider: Box<dyn LlmProvider>,
    tools: ToolRegistry,
    config: AgentConfig,
}

impl SearchAgent {
    pub fn new(provider: Box<dyn LlmProvider>, tools: ToolRegistry, config: AgentConfig) -> Self {
        Self {
            provider,
            tools,
            config,
        }
    }
}

#[async_trait]
impl ResearchAgent for SearchAgent {
    async fn ask(&self, query: &str) -> Result<String, AgentError> {
        info!(model = self.provider.default_model(), "Research agent received query");

        let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(query)];
        let tool_defs = self.tools.definitions();

        for iteration in 1..=self.config.max_iterations {
            debug!(iteration, msg_count = messages.len(), "Calling LLM");

            let response = self
                .provider
                .chat(&messages, &tool_defs, &self.config.completion)
                .await?;

            if response.tool_calls.is_empty() {
                info!(
                    tokens = response.usage.total_tokens,
                    iteration, "Research agent answered"
                );
                return Ok(response.content.unwrap_or_default());
            }

            messages.push(ChatMessage::assistant_with_tool_calls(
                response.content.as_deref(),
                response.tool_calls.iter().map(|tc| tc.to_message()).collect(),
            ));

            for tc in &response.tool_calls {
                debug!(tool = %tc.name, id = %tc.id, "Executing tool call");
                let result = self.tools.execute(&tc.name, &tc.arguments).await;
                messages.push(ChatMessage::tool_result(&tc.id, &tc.name, &result));
            }
        }

        warn!(
            iterations = self.config.max_iterations,
            "Hit max tool iterations without an answer"
        );
        Err(AgentError::IterationLimit(self.config.max_iterations))
    }
}
