//! tally-finance: category taxonomy and merchant heuristics for statement rows

pub mod category_rules;
pub mod merchant;

pub use category_rules::{categorize, CategoryRule, CategoryRules, DEFAULT_FALLBACK};
pub use merchant::extract_merchant;
