//! Action handlers: one per intent, all behind [`ActionHandler`].
//!
//! Some handlers compute against the ledger, some return fixed advice, and
//! one may call the research agent. The dispatcher does not care which;
//! it looks the handler up in a [`HandlerRegistry`] by intent tag.

pub mod adjust;
pub mod advisory;
pub mod product;
pub mod report;

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

use crate::intent::IntentTag;
use crate::ledger::BudgetLedger;
use crate::product::ProductAdvisor;

pub use adjust::AdjustHandler;
pub use advisory::AdvisoryHandler;
pub use product::ProductHandler;
pub use report::ReportHandler;

/// What produced a reply. The presentation layer keys off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Ledger,
    Canned,
    Catalog,
    Agent,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

impl Reply {
    pub fn new(source: ReplySource, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// The intent this handler serves.
    fn intent(&self) -> IntentTag;

    /// Produce the reply for one utterance. Handlers never fail: anything
    /// that goes wrong is reported in the reply text.
    async fn handle(&self, utterance: &str, ledger: &mut BudgetLedger) -> Reply;
}

/// Handlers keyed by the intent they serve.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<IntentTag, Box<dyn ActionHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in handler, with `advisor` answering product questions.
    pub fn with_defaults(advisor: ProductAdvisor) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ReportHandler));
        registry.register(Box::new(AdjustHandler::default()));
        registry.register(Box::new(AdvisoryHandler::recommend()));
        registry.register(Box::new(AdvisoryHandler::risk()));
        registry.register(Box::new(AdvisoryHandler::margin()));
        registry.register(Box::new(ProductHandler::new(advisor)));
        registry
    }

    /// Register a handler, replacing any existing one for the same intent.
    pub fn register(&mut self, handler: Box<dyn ActionHandler>) {
        debug!(intent = handler.intent().as_str(), "Registered handler");
        self.handlers.insert(handler.intent(), handler);
    }

    pub fn get(&self, intent: IntentTag) -> Option<&dyn ActionHandler> {
        self.handlers.get(&intent).map(|h| h.as_ref())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_known_intent() {
        let registry = HandlerRegistry::with_defaults(ProductAdvisor::default());
        for tag in [
            IntentTag::ReportSummary,
            IntentTag::AdjustCategoryForecast,
            IntentTag::RecommendAction,
            IntentTag::ShowRiskInsight,
            IntentTag::OptimizeMargin,
            IntentTag::AnalyzeProduct,
        ] {
            assert_eq!(registry.get(tag).map(|h| h.intent()), Some(tag));
        }
        assert!(registry.get(IntentTag::Unknown).is_none());
        assert_eq!(registry.len(), 6);
    }

    #[tokio::test]
    async fn test_register_replaces() {
        struct Loud;

        #[async_trait]
        impl ActionHandler for Loud {
            fn intent(&self) -> IntentTag {
                IntentTag::RecommendAction
            }
            async fn handle(&self, _utterance: &str, _ledger: &mut BudgetLedger) -> Reply {
                Reply::new(ReplySource::Canned, "BUY NOTHING")
            }
        }

        let mut registry = HandlerRegistry::with_defaults(ProductAdvisor::default());
        registry.register(Box::new(Loud));
        let mut ledger = BudgetLedger::new();
        let reply = registry
            .get(IntentTag::RecommendAction)
            .unwrap()
            .handle("recommend", &mut ledger)
            .await;
        assert_eq!(reply.text, "BUY NOTHING");
    }
}
