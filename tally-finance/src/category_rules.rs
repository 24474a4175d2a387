//! Deterministic keyword rules mapping statement descriptions to
//! spending categories.
//!
//! The taxonomy is data: an ordered list of (keywords, label). Matching is a
//! case-insensitive substring test and the first rule with any hit wins.

use serde::{Deserialize, Serialize};

pub const DEFAULT_FALLBACK: &str = "Others";

/// One row of the taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    /// Keywords are stored lowercased so matching only lowercases the input.
    pub fn new<S: AsRef<str>>(label: impl Into<String>, keywords: &[S]) -> Self {
        Self {
            label: label.into(),
            keywords: keywords
                .iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// Ordered category taxonomy with a fallback label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
    fallback: String,
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self::new(
            vec![
                CategoryRule::new("Food & Restaurants", &["zomato", "swiggy", "restaurant"]),
                CategoryRule::new("Transport", &["uber", "ola", "cab"]),
                CategoryRule::new("Rent", &["rent"]),
                CategoryRule::new("Salary", &["salary", "credit from employer"]),
                CategoryRule::new("Shopping", &["amazon", "flipkart", "myntra"]),
                CategoryRule::new("Subscriptions", &["netflix", "spotify", "subscription"]),
            ],
            DEFAULT_FALLBACK,
        )
    }
}

impl CategoryRules {
    pub fn new(rules: Vec<CategoryRule>, fallback: impl Into<String>) -> Self {
        // Re-normalize keywords: rules may come straight from a config file
        let rules = rules
            .into_iter()
            .map(|r| CategoryRule::new(r.label, r.keywords.as_slice()))
            .collect();
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Category label for a description. Rules are tried in order.
    pub fn categorize(&self, description: &str) -> &str {
        let lowered = description.to_lowercase();
        self.rules
            .iter()
            .find(|r| r.matches(&lowered))
            .map(|r| r.label.as_str())
            .unwrap_or(&self.fallback)
    }
}

/// Categorize with the built-in taxonomy.
pub fn categorize(description: &str) -> String {
    CategoryRules::default().categorize(description).to_string()
}
