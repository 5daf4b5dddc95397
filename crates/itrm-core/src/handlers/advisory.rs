//! Fixed advisory replies for recommendations, risk, and margin questions.
//!
//! These ignore the utterance and the ledger for now; they sit behind the
//! same trait as the computed handlers so a real analysis can replace any
//! of them without touching the dispatcher.

use async_trait::async_trait;

use super::{ActionHandler, Reply, ReplySource};
use crate::intent::IntentTag;
use crate::ledger::BudgetLedger;

pub const RECOMMEND_REPLY: &str =
    "You could reduce Telecom and Maintenance by 15% to save money without significantly increasing risk.";
pub const RISK_REPLY: &str =
    "Cybersecurity and BC/DR protect 43% of revenue with a combined ROPR of 5.3x.";
pub const MARGIN_REPLY: &str =
    "To improve margin by 2%, consider reducing Personnel and Maintenance by 5% each.";

pub struct AdvisoryHandler {
    intent: IntentTag,
    text: &'static str,
}

impl AdvisoryHandler {
    pub const fn new(intent: IntentTag, text: &'static str) -> Self {
        Self { intent, text }
    }

    pub const fn recommend() -> Self {
        Self::new(IntentTag::RecommendAction, RECOMMEND_REPLY)
    }

    pub const fn risk() -> Self {
        Self::new(IntentTag::ShowRiskInsight, RISK_REPLY)
    }

    pub const fn margin() -> Self {
        Self::new(IntentTag::OptimizeMargin, MARGIN_REPLY)
    }
}

#[async_trait]
impl ActionHandler for AdvisoryHandler {
    fn intent(&self) -> IntentTag {
        self.intent
    }

    async fn handle(&self, _utterance: &str, _ledger: &mut BudgetLedger) -> Reply {
        Reply::new(ReplySource::Canned, self.text)
    }
}
