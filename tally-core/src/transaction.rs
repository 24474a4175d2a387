//! Normalized transaction records produced by statement ingestion

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of money movement for a parsed row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl TransactionType {
    /// Classify a signed amount. Zero counts as income.
    pub fn from_signed(value: f64) -> Self {
        if value >= 0.0 {
            TransactionType::Income
        } else {
            TransactionType::Expense
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One bank statement row after column detection, date normalization
/// and categorization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedTransaction {
    /// Calendar date, serialized as YYYY-MM-DD
    pub date: NaiveDate,
    /// Never empty ("Transaction" when the source cell was blank)
    pub description: String,
    /// First whitespace token of the source description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    /// Magnitude only; direction lives in `kind`
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
}

impl ParsedTransaction {
    /// Create a record. Negative amounts are folded to their magnitude.
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        merchant: Option<String>,
        amount: f64,
        kind: TransactionType,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            merchant,
            amount: amount.abs(),
            kind,
            category: category.into(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Positive = income, negative = expense
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}
