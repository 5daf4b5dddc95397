//! Second-pass classifier for product-comparison phrasing.
//!
//! Plain substring matching, no word boundaries: "options" hits "option"
//! and so does "adoption". Kept out of the primary table so these broad
//! words never shadow a budget operation.

use super::IntentTag;

pub const DEFAULT_FALLBACK_KEYWORDS: &[&str] = &[
    "compare",
    "alternative",
    "better than",
    "replace",
    "product",
    "option",
    "upgrade",
];

pub struct FallbackClassifier {
    keywords: Vec<String>,
}

impl FallbackClassifier {
    pub fn new(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn classify(&self, utterance: &str) -> IntentTag {
        let lower = utterance.to_lowercase();
        if self.keywords.iter().any(|kw| lower.contains(kw.as_str())) {
            IntentTag::AnalyzeProduct
        } else {
            IntentTag::Unknown
        }
    }
}

impl Default for FallbackClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_KEYWORDS)
    }
}
