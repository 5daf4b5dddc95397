//! `adjust_category_forecast`: move one category up or down by 10%.

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, warn};

use super::{ActionHandler, Reply, ReplySource};
use crate::intent::IntentTag;
use crate::ledger::{format_currency, BudgetLedger, Direction};

pub const CLARIFY_REPLY: &str = "Which category would you like to adjust?";

pub struct AdjustHandler {
    increase: Regex,
    decrease: Regex,
}

impl AdjustHandler {
    /// Which way the utterance asks to move. "increase" is checked first.
    pub fn direction(&self, utterance: &str) -> Option<Direction> {
        if self.increase.is_match(utterance) {
            Some(Direction::Increase)
        } else if self.decrease.is_match(utterance) {
            Some(Direction::Decrease)
        } else {
            None
        }
    }

    /// Apply the adjustment the utterance describes, or ask which category.
    ///
    /// A named category without a direction gets the same generic prompt
    /// as no category at all.
    pub fn apply(&self, utterance: &str, ledger: &mut BudgetLedger) -> String {
        let Some(category) = ledger.find_mentioned(utterance) else {
            debug!("No category named in adjustment request");
            return CLARIFY_REPLY.to_string();
        };
        let Some(direction) = self.direction(utterance) else {
            debug!(category = category.label(), "Category named without a direction");
            return CLARIFY_REPLY.to_string();
        };

        let new_value = match ledger.adjust(category, direction) {
            Ok(amount) => format_currency(amount),
            Err(e) => {
                warn!(category = category.label(), error = %e, "Adjustment rejected");
                return format!("Couldn't adjust {category} budget: {e}");
            }
        };
        match direction {
            Direction::Increase => {
                format!("Increased {category} budget by 10%. New value: {new_value}")
            }
            Direction::Decrease => {
                format!("Decreased {category} budget by 10%. New value: {new_value}")
            }
        }
    }
}

impl Default for AdjustHandler {
    fn default() -> Self {
        // Literal patterns; compilation cannot fail.
        Self {
            increase: Regex::new(r"(?i)\bincrease\b").expect("valid pattern"),
            decrease: Regex::new(r"(?i)\bdecrease\b").expect("valid pattern"),
        }
    }
}

#[async_trait]
impl ActionHandler for AdjustHandler {
    fn intent(&self) -> IntentTag {
        IntentTag::AdjustCategoryForecast
    }

    async fn handle(&self, utterance: &str, ledger: &mut BudgetLedger) -> Reply {
        Reply::new(ReplySource::Ledger, self.apply(utterance, ledger))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Category;
    use rust_decimal::Decimal;

    #[test]
    fn test_increase_hardware() {
        let mut ledger = BudgetLedger::new();
        let reply = AdjustHandler::default().apply("increase Hardware", &mut ledger);
        assert_eq!(reply, "Increased Hardware budget by 10%. New value: $352,000");
        assert_eq!(ledger.amount(Category::Hardware), Decimal::from(352_000));
    }

    #[test]
    fn test_decrease_is_case_insensitive() {
        let mut ledger = BudgetLedger::new();
        let reply = AdjustHandler::default().apply("Please DECREASE telecom spend", &mut ledger);
        assert_eq!(reply, "Decreased Telecom budget by 10%. New value: $108,000");
        assert_eq!(ledger.amount(Category::Telecom), Decimal::from(108_000));
    }

    #[test]
    fn test_every_category_scales_exactly() {
        let handler = AdjustHandler::default();
        for category in Category::ALL {
            let mut ledger = BudgetLedger::new();
            let before = ledger.amount(category);
            handler.apply(&format!("increase {}", category.label()), &mut ledger);
            assert_eq!(ledger.amount(category), before * Decimal::new(110, 2));

            let mut ledger = BudgetLedger::new();
            handler.apply(&format!("decrease {}", category.label()), &mut ledger);
            assert_eq!(ledger.amount(category), before * Decimal::new(90, 2));
        }
    }

    #[test]
    fn test_increase_wins_over_decrease() {
        let mut ledger = BudgetLedger::new();
        let reply = AdjustHandler::default().apply("increase not decrease software", &mut ledger);
        assert!(reply.starts_with("Increased Software"));
    }

    #[test]
    fn test_word_boundary_on_direction() {
        let mut ledger = BudgetLedger::new();
        let reply = AdjustHandler::default().apply("increased hardware", &mut ledger);
        assert_eq!(reply, CLARIFY_REPLY);
        assert_eq!(ledger, BudgetLedger::new());
    }

    #[test]
    fn test_no_category() {
        let mut ledger = BudgetLedger::new();
        let reply = AdjustHandler::default().apply("increase everything", &mut ledger);
        assert_eq!(reply, CLARIFY_REPLY);
        assert_eq!(ledger, BudgetLedger::new());
    }

    #[test]
    fn test_category_without_direction() {
        let mut ledger = BudgetLedger::new();
        let reply = AdjustHandler::default().apply("adjust personnel", &mut ledger);
        assert_eq!(reply, CLARIFY_REPLY);
        assert_eq!(ledger, BudgetLedger::new());
    }

    #[test]
    fn test_revenue_is_never_adjusted() {
        let mut ledger = BudgetLedger::new();
        let reply = AdjustHandler::default().apply("increase revenue", &mut ledger);
        assert_eq!(reply, CLARIFY_REPLY);
        assert_eq!(ledger.revenue(), Decimal::from(100_000_000));
    }

    #[test]
    fn test_overflow_becomes_reply() {
        let mut ledger = BudgetLedger::new();
        ledger.set_amount(Category::Software, Decimal::MAX);
        let reply = AdjustHandler::default().apply("increase software", &mut ledger);
        assert_eq!(
            reply,
            "Couldn't adjust Software budget: the amount is too large to represent"
        );
        assert_eq!(ledger.amount(Category::Software), Decimal::MAX);
    }
}
