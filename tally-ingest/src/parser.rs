//! StatementParser: turns a bank CSV export into normalized transactions.
//!
//! Bad rows are skipped and bad cells defaulted; parsing text never fails.

use chrono::NaiveDate;
use serde::Serialize;
use tally_core::{IngestError, IngestResult, ParsedTransaction, TransactionType};
use tally_finance::{extract_merchant, CategoryRules};
use tracing::{debug, info, warn};

use crate::columns::detect_columns;
use crate::dates::normalize_date;
use crate::rows::{clean_cell, split_statement, Row};
use crate::types::{AmountLayout, ColumnMap};

pub const DEFAULT_DESCRIPTION: &str = "Transaction";
pub const MIN_FIELDS: usize = 3;

const NO_TRANSACTIONS_HINT: &str = "No transactions detected. Check that the header row names a \
date column, a description (or narration) column, and either debit/credit or amount columns.";

/// Why a data row produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    TooFewFields(usize),
    NoDebitOrCredit,
}

/// Result of a parse-only run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub transactions: Vec<ParsedTransaction>,
    /// Data rows that produced no record
    pub skipped: usize,
}

impl Preview {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Corrective hint for the "no transactions detected" case
    pub fn hint(&self) -> Option<&'static str> {
        self.is_empty().then_some(NO_TRANSACTIONS_HINT)
    }
}

#[derive(Debug, Clone)]
pub struct StatementParser {
    rules: CategoryRules,
    today: NaiveDate,
}

impl StatementParser {
    /// `today` is the ingestion date used for unreadable date cells.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            rules: CategoryRules::default(),
            today,
        }
    }

    pub fn with_rules(mut self, rules: CategoryRules) -> Self {
        self.rules = rules;
        self
    }

    /// Parse statement text into records in input-row order.
    pub fn parse(&self, text: &str) -> Vec<ParsedTransaction> {
        self.preview(text).transactions
    }

    /// Parse raw bytes; only non-UTF-8 input is an error.
    pub fn parse_bytes(&self, bytes: &[u8]) -> IngestResult<Vec<ParsedTransaction>> {
        Ok(self.parse(decode_statement(bytes)?))
    }

    pub fn preview(&self, text: &str) -> Preview {
        let Some(split) = split_statement(text) else {
            info!("statement has no data rows");
            return Preview {
                transactions: Vec::new(),
                skipped: 0,
            };
        };

        let cols = detect_columns(&split.header);
        debug!(?cols, header = ?split.header, "detected columns");
        if cols.date.is_none() {
            warn!("no date column detected; rows will use the ingestion date");
        }
        if cols.has_no_amount() {
            warn!("no debit, credit or amount column detected; amounts will be 0");
        }

        let mut transactions = Vec::with_capacity(split.rows.len());
        let mut skipped = 0;
        for row in &split.rows {
            match self.extract_row(&cols, row) {
                Ok(txn) => transactions.push(txn),
                Err(reason) => {
                    skipped += 1;
                    debug!(line = row.line, ?reason, "skipping row");
                }
            }
        }

        info!(parsed = transactions.len(), skipped, "parsed statement");
        Preview {
            transactions,
            skipped,
        }
    }

    fn extract_row(&self, cols: &ColumnMap, row: &Row<'_>) -> Result<ParsedTransaction, SkipReason> {
        if row.fields.len() < MIN_FIELDS {
            return Err(SkipReason::TooFewFields(row.fields.len()));
        }

        let (amount, kind) = match cols.layout() {
            AmountLayout::DebitCredit => {
                let credit = parse_amount(row.cell(cols.credit));
                let debit = parse_amount(row.cell(cols.debit));
                if credit > 0.0 {
                    (credit, TransactionType::Income)
                } else if debit > 0.0 {
                    (debit, TransactionType::Expense)
                } else {
                    return Err(SkipReason::NoDebitOrCredit);
                }
            }
            AmountLayout::Signed => {
                let value = parse_amount(row.cell(cols.amount));
                (value.abs(), TransactionType::from_signed(value))
            }
        };

        let raw_description = clean_cell(row.cell(cols.description));
        let merchant = extract_merchant(raw_description);
        let description = if raw_description.is_empty() {
            DEFAULT_DESCRIPTION
        } else {
            raw_description
        };
        let category = self.rules.categorize(description);
        let date = normalize_date(row.cell(cols.date), self.today);

        Ok(ParsedTransaction::new(
            date,
            description,
            merchant,
            amount,
            kind,
            category,
        ))
    }
}

/// Decode statement bytes as UTF-8 text.
pub fn decode_statement(bytes: &[u8]) -> IngestResult<&str> {
    std::str::from_utf8(bytes).map_err(|e| IngestError::InvalidInput {
        message: format!("statement is not valid UTF-8 text: {e}"),
    })
}

/// Numeric cell to f64; anything unreadable is 0.
fn parse_amount(cell: &str) -> f64 {
    clean_cell(cell)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
