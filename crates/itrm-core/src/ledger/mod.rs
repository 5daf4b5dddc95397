//! In-memory budget ledger.
//!
//! Holds one amount per IT spend category plus the company revenue. The
//! ledger is owned by a [`Session`](crate::session::Session) and starts
//! from fixed defaults every time; nothing is written to disk.

use rust_decimal::Decimal;
use tracing::info;

use crate::error::LedgerError;

/// IT spend categories, in ledger insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Hardware,
    Software,
    Personnel,
    Maintenance,
    Telecom,
    Cybersecurity,
    BcDr,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Hardware,
        Category::Software,
        Category::Personnel,
        Category::Maintenance,
        Category::Telecom,
        Category::Cybersecurity,
        Category::BcDr,
    ];

    /// Display label, also the text matched inside utterances.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Hardware => "Hardware",
            Category::Software => "Software",
            Category::Personnel => "Personnel",
            Category::Maintenance => "Maintenance",
            Category::Telecom => "Telecom",
            Category::Cybersecurity => "Cybersecurity",
            Category::BcDr => "BC/DR",
        }
    }

    fn default_amount(&self) -> Decimal {
        let dollars: i64 = match self {
            Category::Hardware => 320_000,
            Category::Software => 280_000,
            Category::Personnel => 500_000,
            Category::Maintenance => 160_000,
            Category::Telecom => 120_000,
            Category::Cybersecurity => 220_000,
            Category::BcDr => 140_000,
        };
        Decimal::from(dollars)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of a forecast adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    /// Multiplier applied to the category amount (exactly 1.10 or 0.90).
    pub fn factor(&self) -> Decimal {
        match self {
            Direction::Increase => Decimal::new(110, 2),
            Direction::Decrease => Decimal::new(90, 2),
        }
    }
}

const DEFAULT_REVENUE: i64 = 100_000_000;

/// Category amounts plus revenue for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLedger {
    entries: Vec<(Category, Decimal)>,
    revenue: Decimal,
}

impl BudgetLedger {
    /// A ledger populated with the default forecast.
    pub fn new() -> Self {
        Self {
            entries: Category::ALL
                .iter()
                .map(|c| (*c, c.default_amount()))
                .collect(),
            revenue: Decimal::from(DEFAULT_REVENUE),
        }
    }

    /// Restore every amount to its default.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn amount(&self, category: Category) -> Decimal {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, v)| *v)
            .unwrap_or_default()
    }

    /// Overwrite a category amount. Negative values are clamped to zero.
    pub fn set_amount(&mut self, category: Category, amount: Decimal) {
        let amount = amount.max(Decimal::ZERO);
        if let Some(entry) = self.entries.iter_mut().find(|(c, _)| *c == category) {
            entry.1 = amount;
        }
    }

    pub fn revenue(&self) -> Decimal {
        self.revenue
    }

    pub fn set_revenue(&mut self, revenue: Decimal) {
        self.revenue = revenue.max(Decimal::ZERO);
    }

    /// Categories with their amounts, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        self.entries.iter().copied()
    }

    /// First category (in insertion order) whose label occurs anywhere in
    /// `utterance`, compared case-insensitively. Revenue is never a match.
    pub fn find_mentioned(&self, utterance: &str) -> Option<Category> {
        let lower = utterance.to_lowercase();
        self.entries
            .iter()
            .map(|(c, _)| *c)
            .find(|c| lower.contains(&c.label().to_lowercase()))
    }

    /// Multiply a category by the direction's factor and return the new amount.
    ///
    /// On overflow the amount is left as it was.
    pub fn adjust(&mut self, category: Category, direction: Direction) -> Result<Decimal, LedgerError> {
        let Some(entry) = self.entries.iter_mut().find(|(c, _)| *c == category) else {
            return Ok(Decimal::ZERO);
        };
        let before = entry.1;
        let after = before
            .checked_mul(direction.factor())
            .ok_or(LedgerError::Overflow)?;
        entry.1 = after;
        info!(
            category = category.label(),
            ?direction,
            before = %before,
            after = %after,
            "Adjusted category forecast"
        );
        Ok(after)
    }

    /// Sum of all category amounts. Revenue is excluded.
    pub fn total_spend(&self) -> Result<Decimal, LedgerError> {
        self.entries
            .iter()
            .try_fold(Decimal::ZERO, |acc, (_, v)| acc.checked_add(*v))
            .ok_or(LedgerError::Overflow)
    }

    /// Total spend as a percentage of revenue.
    pub fn spend_to_revenue_ratio(&self) -> Result<Decimal, LedgerError> {
        if self.revenue.is_zero() {
            return Err(LedgerError::DivisionByZero);
        }
        self.total_spend()?
            .checked_div(self.revenue)
            .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or(LedgerError::Overflow)
    }
}

impl Default for BudgetLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Format as whole dollars with thousands separators, e.g. `$1,740,000`.
///
/// Ties round to even.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Format with exactly two decimal places, e.g. `1.74`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ledger = BudgetLedger::new();
        assert_eq!(ledger.amount(Category::Hardware), Decimal::from(320_000));
        assert_eq!(ledger.amount(Category::BcDr), Decimal::from(140_000));
        assert_eq!(ledger.revenue(), Decimal::from(100_000_000));
    }

    #[test]
    fn test_total_excludes_revenue() {
        let ledger = BudgetLedger::new();
        assert_eq!(ledger.total_spend(), Ok(Decimal::from(1_740_000)));
    }

    #[test]
    fn test_ratio() {
        let ledger = BudgetLedger::new();
        let ratio = ledger.spend_to_revenue_ratio().unwrap();
        assert_eq!(format_percent(ratio), "1.74");
    }

    #[test]
    fn test_ratio_zero_revenue() {
        let mut ledger = BudgetLedger::new();
        ledger.set_revenue(Decimal::ZERO);
        assert_eq!(
            ledger.spend_to_revenue_ratio(),
            Err(LedgerError::DivisionByZero)
        );
    }

    #[test]
    fn test_adjust_is_exact() {
        let mut ledger = BudgetLedger::new();
        let up = ledger.adjust(Category::Hardware, Direction::Increase).unwrap();
        assert_eq!(up, Decimal::from(352_000));

        let down = ledger.adjust(Category::Telecom, Direction::Decrease).unwrap();
        assert_eq!(down, Decimal::from(108_000));

        // Compounding stays exact: 352000 * 1.1 = 387200
        let again = ledger.adjust(Category::Hardware, Direction::Increase).unwrap();
        assert_eq!(again, Decimal::from(387_200));
    }

    #[test]
    fn test_adjust_overflow_leaves_amount_unchanged() {
        let mut ledger = BudgetLedger::new();
        ledger.set_amount(Category::Hardware, Decimal::MAX);
        assert_eq!(
            ledger.adjust(Category::Hardware, Direction::Increase),
            Err(LedgerError::Overflow)
        );
        assert_eq!(ledger.amount(Category::Hardware), Decimal::MAX);

        // Shrinking a huge amount still works.
        assert!(ledger.adjust(Category::Hardware, Direction::Decrease).is_ok());
    }

    #[test]
    fn test_total_and_ratio_overflow() {
        let mut ledger = BudgetLedger::new();
        ledger.set_amount(Category::Hardware, Decimal::MAX);
        ledger.set_amount(Category::Software, Decimal::MAX);
        assert_eq!(ledger.total_spend(), Err(LedgerError::Overflow));
        assert_eq!(ledger.spend_to_revenue_ratio(), Err(LedgerError::Overflow));
    }

    #[test]
    fn test_set_amount_clamps_negative() {
        let mut ledger = BudgetLedger::new();
        ledger.set_amount(Category::Telecom, Decimal::from(-5));
        assert_eq!(ledger.amount(Category::Telecom), Decimal::ZERO);
    }

    #[test]
    fn test_find_mentioned_is_case_insensitive() {
        let ledger = BudgetLedger::new();
        assert_eq!(
            ledger.find_mentioned("raise the bc/dr line"),
            Some(Category::BcDr)
        );
        assert_eq!(
            ledger.find_mentioned("TELECOM please"),
            Some(Category::Telecom)
        );
        assert_eq!(ledger.find_mentioned("revenue up"), None);
    }

    #[test]
    fn test_find_mentioned_uses_insertion_order() {
        let ledger = BudgetLedger::new();
        // Both present; Hardware is inserted first.
        assert_eq!(
            ledger.find_mentioned("software and hardware"),
            Some(Category::Hardware)
        );
    }

    #[test]
    fn test_reset() {
        let mut ledger = BudgetLedger::new();
        ledger.adjust(Category::Personnel, Direction::Decrease).unwrap();
        ledger.reset();
        assert_eq!(ledger, BudgetLedger::new());
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Decimal::from(1_740_000)), "$1,740,000");
        assert_eq!(format_currency(Decimal::from(999)), "$999");
        assert_eq!(format_currency(Decimal::ZERO), "$0");
        assert_eq!(format_currency(Decimal::new(3_872_005, 1)), "$387,200");
        assert_eq!(format_currency(Decimal::new(1_234_567_89, 2)), "$1,234,568");
    }
}
