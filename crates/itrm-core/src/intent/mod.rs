//! Intent routing: keyword-based, zero-cost classification.
//!
//! An utterance is matched against an ordered table of
//! (intent, keywords) rules. The first rule with a whole-word keyword hit
//! wins. Only when nothing matches is the looser fallback table scanned;
//! it can only produce [`IntentTag::AnalyzeProduct`].

pub mod fallback;

use regex::Regex;
use tracing::info;

pub use fallback::FallbackClassifier;

/// The closed set of intents the dispatcher knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentTag {
    ReportSummary,
    AdjustCategoryForecast,
    RecommendAction,
    ShowRiskInsight,
    OptimizeMargin,
    AnalyzeProduct,
    Unknown,
}

impl IntentTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentTag::ReportSummary => "report_summary",
            IntentTag::AdjustCategoryForecast => "adjust_category_forecast",
            IntentTag::RecommendAction => "recommend_action",
            IntentTag::ShowRiskInsight => "show_risk_insight",
            IntentTag::OptimizeMargin => "optimize_margin",
            IntentTag::AnalyzeProduct => "analyze_product",
            IntentTag::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for IntentTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the intent table.
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub tag: IntentTag,
    pub keywords: Vec<String>,
}

impl IntentRule {
    pub fn new(tag: IntentTag, keywords: &[&str]) -> Self {
        Self {
            tag,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// The built-in primary table. Order matters: earlier rules shadow later ones.
pub fn default_rules() -> Vec<IntentRule> {
    vec![
        IntentRule::new(
            IntentTag::ReportSummary,
            &["spending", "it spend", "how much", "summary", "ratio", "show"],
        ),
        IntentRule::new(
            IntentTag::AdjustCategoryForecast,
            &["increase", "decrease", "reduce", "raise", "adjust"],
        ),
        IntentRule::new(
            IntentTag::RecommendAction,
            &["recommend", "suggest", "how can I", "save money", "lower costs"],
        ),
        IntentRule::new(
            IntentTag::ShowRiskInsight,
            &["risk", "at risk", "protect", "exposure"],
        ),
        IntentRule::new(
            IntentTag::OptimizeMargin,
            &["margin", "improve margin", "profit"],
        ),
    ]
}

struct CompiledRule {
    tag: IntentTag,
    patterns: Vec<Regex>,
}

/// First-match-wins classifier over an ordered rule table.
pub struct IntentClassifier {
    rules: Vec<CompiledRule>,
}

impl IntentClassifier {
    /// Compile a rule table. Keywords are lowercased and matched as whole
    /// words or whole phrases.
    pub fn new(rules: Vec<IntentRule>) -> Result<Self, regex::Error> {
        let rules = rules
            .into_iter()
            .map(|rule| {
                let patterns = rule
                    .keywords
                    .iter()
                    .map(|kw| Regex::new(&format!(r"\b{}\b", regex::escape(&kw.to_lowercase()))))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CompiledRule {
                    tag: rule.tag,
                    patterns,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }

    /// Classify an utterance. Returns [`IntentTag::Unknown`] on no match.
    pub fn classify(&self, utterance: &str) -> IntentTag {
        let lower = utterance.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.patterns.iter().any(|p| p.is_match(&lower)))
            .map(|rule| rule.tag)
            .unwrap_or(IntentTag::Unknown)
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        // Every default keyword is escaped, so compilation cannot fail.
        Self::new(default_rules()).expect("built-in intent table is valid")
    }
}

/// Which pass produced the routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStage {
    Primary,
    Fallback,
    Unmatched,
}

/// Primary classifier followed by the fallback pass.
#[derive(Default)]
pub struct IntentRouter {
    primary: IntentClassifier,
    fallback: FallbackClassifier,
}

impl IntentRouter {
    pub fn new(primary: IntentClassifier, fallback: FallbackClassifier) -> Self {
        Self { primary, fallback }
    }

    /// Resolve an utterance to an intent and report which pass decided it.
    pub fn route(&self, utterance: &str) -> (IntentTag, RouteStage) {
        let primary = self.primary.classify(utterance);
        let (tag, stage) = if primary != IntentTag::Unknown {
            (primary, RouteStage::Primary)
        } else {
            match self.fallback.classify(utterance) {
                IntentTag::Unknown => (IntentTag::Unknown, RouteStage::Unmatched),
                tag => (tag, RouteStage::Fallback),
            }
        };

        info!(intent = tag.as_str(), ?stage, "Intent Router classified message");
        (tag, stage)
    }

    /// Shorthand for [`route`](Self::route) without the stage.
    pub fn classify(&self, utterance: &str) -> IntentTag {
        self.route(utterance).0
    }
}
