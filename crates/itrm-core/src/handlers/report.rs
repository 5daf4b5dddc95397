//! `report_summary`: total IT spend and its share of revenue.

use async_trait::async_trait;

use super::{ActionHandler, Reply, ReplySource};
use crate::intent::IntentTag;
use crate::ledger::{format_currency, format_percent, BudgetLedger};

pub struct ReportHandler;

impl ReportHandler {
    /// Summary text for the current ledger. A zero revenue or an
    /// unrepresentable total is reported in the text.
    pub fn summarize(ledger: &BudgetLedger) -> String {
        let total = match ledger.total_spend() {
            Ok(total) => format_currency(total),
            Err(e) => return format!("Total IT Spend unavailable: {e}"),
        };
        match ledger.spend_to_revenue_ratio() {
            Ok(ratio) => format!(
                "Total IT Spend: {total}\nIT-to-Revenue Ratio: {}%",
                format_percent(ratio)
            ),
            Err(e) => format!("Total IT Spend: {total}\nIT-to-Revenue Ratio unavailable: {e}"),
        }
    }
}

#[async_trait]
impl ActionHandler for ReportHandler {
    fn intent(&self) -> IntentTag {
        IntentTag::ReportSummary
    }

    async fn handle(&self, _utterance: &str, ledger: &mut BudgetLedger) -> Reply {
        Reply::new(ReplySource::Ledger, Self::summarize(ledger))
    }
}
