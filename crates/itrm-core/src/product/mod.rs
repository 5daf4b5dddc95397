//! Product comparison lookup.
//!
//! Two interchangeable backends answer `analyze_product` queries: a
//! hardcoded catalog of well-known products, or the web-search research
//! agent. [`ProductAdvisor`] picks between them.

pub mod catalog;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::agent::ResearchAgent;
use crate::error::AgentError;
pub use catalog::{Alternative, ComparisonEntry, ProductCatalog};

pub const DEFAULT_AGENT_TIMEOUT: Duration = Duration::from_secs(60);

/// Where a product answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisorKind {
    Static,
    Agent,
}

pub enum ProductAdvisor {
    Static(ProductCatalog),
    Agent {
        agent: Arc<dyn ResearchAgent>,
        timeout: Duration,
    },
}

impl ProductAdvisor {
    pub fn with_agent(agent: Arc<dyn ResearchAgent>, timeout: Duration) -> Self {
        ProductAdvisor::Agent { agent, timeout }
    }

    pub fn kind(&self) -> AdvisorKind {
        match self {
            ProductAdvisor::Static(_) => AdvisorKind::Static,
            ProductAdvisor::Agent { .. } => AdvisorKind::Agent,
        }
    }

    /// Answer a product question. Agent failures and timeouts come back as
    /// an explanatory sentence, never as an error.
    pub async fn advise(&self, utterance: &str) -> String {
        match self {
            ProductAdvisor::Static(catalog) => catalog.describe(utterance),
            ProductAdvisor::Agent { agent, timeout } => {
                let outcome = match tokio::time::timeout(*timeout, agent.ask(utterance)).await {
                    Ok(result) => result,
                    Err(_) => Err(AgentError::Timeout(*timeout)),
                };
                match outcome {
                    Ok(text) => {
                        info!(chars = text.len(), "Product research complete");
                        text
                    }
                    Err(e) => {
                        warn!(error = %e, "Product research failed");
                        format!("Sorry, I couldn't complete the product research: {e}")
                    }
                }
            }
        }
    }
}

impl Default for ProductAdvisor {
    fn default() -> Self {
        ProductAdvisor::Static(ProductCatalog::default())
    }
}
