//! OpenAI-compatible chat-completions backend.
//!
//! Works with OpenAI itself and anything that mirrors its
//! `/chat/completions` endpoint (OpenRouter, Groq, DeepSeek, local vLLM).
//! Transient HTTP failures are retried with exponential backoff.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::types::{ChatMessage, LlmResponse, ToolCallRequest, ToolDefinition, Usage};
use super::{CompletionSettings, LlmProvider};

/// Default base URLs by provider name.
const PROVIDER_URLS: &[(&str, &str)] = &[
    ("openai", "https://api.openai.com/v1"),
    ("openrouter", "https://openrouter.ai/api/v1"),
    ("groq", "https://api.groq.com/openai/v1"),
    ("deepseek", "https://api.deepseek.com/v1"),
];

const MAX_RETRIES: u32 = 3;
const BASE_DELAY_MS: u64 = 500;

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl OpenAiProvider {
    /// `api_base` overrides the URL looked up from `provider_name`.
    pub fn new(
        provider_name: &str,
        api_key: &str,
        api_base: Option<&str>,
        default_model: &str,
        client: Client,
    ) -> Self {
        let base_url = api_base
            .or_else(|| {
                PROVIDER_URLS
                    .iter()
                    .find(|(name, _)| *name == provider_name)
                    .map(|(_, url)| *url)
            })
            .unwrap_or("https://api.openai.com/v1")
            .trim_end_matches('/')
            .to_string();

        debug!(provider = provider_name, base_url = %base_url, "Initialized LLM provider");

        Self {
            client,
            api_key: api_key.to_string(),
            base_url,
            default_model: default_model.to_string(),
        }
    }

    fn is_retryable_status(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolDefinition]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<UsageResponse>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageResponse,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct MessageResponse {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCallResponse>,
}

#[derive(Deserialize)]
struct ToolCallResponse {
    id: String,
    function: FunctionCallResponse,
}

#[derive(Deserialize)]
struct FunctionCallResponse {
    name: String,
    arguments: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct UsageResponse {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Parse a successful completion body into an [`LlmResponse`].
fn parse_completion(body: &str) -> Result<LlmResponse> {
    let completion: CompletionResponse =
        serde_json::from_str(body).context("Failed to parse LLM API response")?;

    let choice = completion
        .choices
        .into_iter()
        .next()
        .context("LLM API returned no choices")?;

    let tool_calls = choice
        .message
        .tool_calls
        .into_iter()
        .filter_map(|tc| {
            match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(
                &tc.function.arguments,
            ) {
                Ok(arguments) => Some(ToolCallRequest {
                    id: tc.id,
                    name: tc.function.name,
                    arguments,
                }),
                Err(e) => {
                    warn!(tool = %tc.function.name, error = %e, "Unparseable tool arguments, skipping");
                    None
                }
            }
        })
        .collect();

    let usage = completion.usage.unwrap_or_default();

    Ok(LlmResponse {
        content: choice.message.content,
        tool_calls,
        finish_reason: choice.finish_reason.unwrap_or_else(|| "stop".into()),
        usage: Usage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        },
    })
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
        settings: &CompletionSettings,
    ) -> Result<LlmResponse> {
        let model = settings.model.as_deref().unwrap_or(&self.default_model);
        let url = format!("{}/chat/completions", self.base_url);
        let tools = (!tools.is_empty()).then_some(tools);

        let request_body = CompletionRequest {
            model,
            messages,
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            tools,
            tool_choice: tools.map(|_| "auto"),
        };

        debug!(model, url = %url, msg_count = messages.len(), "Sending chat completion request");

        let mut last_error = None;
        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = BASE_DELAY_MS * 2u64.pow(attempt - 1);
                warn!(attempt, delay_ms = delay, "Retrying LLM API request");
                tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
            }

            let response = match self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    warn!(attempt, error = %e, "Network error calling LLM API");
                    last_error = Some(anyhow::Error::from(e));
                    continue;
                }
            };

            let status = response.status();
            let body = response
                .text()
                .await
                .context("Failed to read LLM API response body")?;

            if status.is_success() {
                let parsed = parse_completion(&body)?;
                debug!(
                    finish_reason = %parsed.finish_reason,
                    tool_calls = parsed.tool_calls.len(),
                    tokens = parsed.usage.total_tokens,
                    "Received LLM response"
                );
                return Ok(parsed);
            }

            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            if !Self::is_retryable_status(status) {
                anyhow::bail!("LLM API error ({status}): {message}");
            }
            warn!(attempt, status = %status, "Transient LLM API error, will retry");
            last_error = Some(anyhow::anyhow!("LLM API error ({status}): {message}"));
        }

        Err(last_error.unwrap_or_else(|| {
            anyhow::anyhow!("LLM API request failed after {MAX_RETRIES} attempts")
        }))
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}
