//! `analyze_product`: product alternatives from the catalog or the agent.

use async_trait::async_trait;

use super::{ActionHandler, Reply, ReplySource};
use crate::intent::IntentTag;
use crate::ledger::BudgetLedger;
use crate::product::{AdvisorKind, ProductAdvisor};

pub struct ProductHandler {
    advisor: ProductAdvisor,
}

impl ProductHandler {
    pub fn new(advisor: ProductAdvisor) -> Self {
        Self { advisor }
    }
}

#[async_trait]
impl ActionHandler for ProductHandler {
    fn intent(&self) -> IntentTag {
        IntentTag::AnalyzeProduct
    }

    async fn handle(&self, utterance: &str, _ledger: &mut BudgetLedger) -> Reply {
        let source = match self.advisor.kind() {
            AdvisorKind::Static => ReplySource::Catalog,
            AdvisorKind::Agent => ReplySource::Agent,
        };
        Reply::new(source, self.advisor.advise(utterance).await)
    }
}
