//! The dispatcher: one utterance in, one reply out.
//!
//! Routing and handling are a single step per turn. No intent leads to
//! another and no conversation history is kept; the only thing a turn
//! leaves behind is whatever it did to the session's ledger.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::agent::{AgentConfig, SearchAgent};
use crate::config::{Config, ProductMode};
use crate::error::ConfigError;
use crate::handlers::{HandlerRegistry, Reply, ReplySource};
use crate::intent::{IntentRouter, IntentTag, RouteStage};
use crate::product::ProductAdvisor;
use crate::provider::openai::OpenAiProvider;
use crate::provider::CompletionSettings;
use crate::session::Session;
use crate::tools::web::WebSearchTool;
use crate::tools::ToolRegistry;

pub const DEFAULT_REPLY: &str = "I'm not sure how to help with that yet, but I'm learning!";

/// The outcome of one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub intent: IntentTag,
    pub stage: RouteStage,
    pub reply: Reply,
}

pub struct Assistant {
    router: IntentRouter,
    handlers: HandlerRegistry,
}

impl Assistant {
    pub fn new(router: IntentRouter, handlers: HandlerRegistry) -> Self {
        Self { router, handlers }
    }

    /// Default routing tables and handlers, with `advisor` for product questions.
    pub fn with_advisor(advisor: ProductAdvisor) -> Self {
        Self::new(IntentRouter::default(), HandlerRegistry::with_defaults(advisor))
    }

    /// Wire up an assistant from configuration.
    ///
    /// In agent mode this builds the LLM provider and the `web_search`
    /// tool; missing credentials fail here, before any turn is served.
    pub fn from_config(config: &Config, client: reqwest::Client) -> Result<Self, Vec<ConfigError>> {
        config.validate()?;

        let advisor = match config.product.mode {
            ProductMode::Static => ProductAdvisor::Static(config.product.catalog()),
            ProductMode::Agent => {
                let defaults = &config.agents.defaults;
                let Some((name, entry)) = config.providers.find_active() else {
                    return Err(vec![ConfigError::MissingCredential {
                        name: "LLM API key",
                        env_var: crate::config::LLM_KEY_ENV,
                        config_key: "providers.<name>.apiKey",
                    }]);
                };
                let model = entry.model.as_deref().unwrap_or(&defaults.model);
                let provider = OpenAiProvider::new(
                    name,
                    &entry.api_key,
                    entry.api_base.as_deref(),
                    model,
                    client.clone(),
                );

                let mut tools = ToolRegistry::new();
                tools.register(Box::new(WebSearchTool::new(
                    client,
                    &config.tools.web_search.api_key,
                    config.tools.web_search.max_results,
                )));

                let agent = SearchAgent::new(
                    Box::new(provider),
                    tools,
                    AgentConfig {
                        completion: CompletionSettings {
                            model: None,
                            max_tokens: defaults.max_tokens,
                            temperature: defaults.temperature,
                        },
                        max_iterations: defaults.max_tool_iterations,
                    },
                );
                ProductAdvisor::with_agent(
                    Arc::new(agent),
                    Duration::from_secs(defaults.timeout_seconds),
                )
            }
        };

        info!(mode = ?config.product.mode, "Assistant ready");
        Ok(Self::with_advisor(advisor))
    }

    pub fn router(&self) -> &IntentRouter {
        &self.router
    }

    pub async fn respond(&self, session: &mut Session, utterance: &str) -> Turn {
        session.turns += 1;
        let (intent, stage) = self.router.route(utterance);

        let reply = match self.handlers.get(intent) {
            Some(handler) => {
                debug!(intent = intent.as_str(), "Dispatching to handler");
                handler.handle(utterance, &mut session.ledger).await
            }
            None => Reply::new(ReplySource::Default, DEFAULT_REPLY),
        };

        info!(
            session = %session.key,
            turn = session.turns,
            intent = intent.as_str(),
            source = ?reply.source,
            "Turn complete"
        );

        Turn {
            intent,
            stage,
            reply,
        }
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::with_advisor(ProductAdvisor::default())
    }
}
