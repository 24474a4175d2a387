//! Column detector: maps header cells to semantic slots by keyword.
//!
//! Each slot takes the first header cell (left to right) containing one of
//! its keywords. Keywords of a slot are tried in order, so a later keyword is
//! only a fallback. "transaction date" and "value date" both match `date`;
//! the leftmost wins.

use crate::types::ColumnMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Date,
    Description,
    Debit,
    Credit,
    Amount,
}

/// (slot, keywords in priority order)
const COLUMN_RULES: &[(Slot, &[&str])] = &[
    (Slot::Date, &["date"]),
    // "narration" is what several Indian banks call the description column
    (Slot::Description, &["description", "narration"]),
    (Slot::Debit, &["debit"]),
    (Slot::Credit, &["credit"]),
    (Slot::Amount, &["amount"]),
];

fn find_column(header: &[String], keywords: &[&str]) -> Option<usize> {
    keywords
        .iter()
        .find_map(|k| header.iter().position(|cell| cell.contains(*k)))
}

/// Detect column positions from a lowercased header.
pub fn detect_columns(header: &[String]) -> ColumnMap {
    let mut cols = ColumnMap::default();
    for (slot, keywords) in COLUMN_RULES {
        let found = find_column(header, keywords);
        match slot {
            Slot::Date => cols.date = found,
            Slot::Description => cols.description = found,
            Slot::Debit => cols.debit = found,
            Slot::Credit => cols.credit = found,
            Slot::Amount => cols.amount = found,
        }
    }
    // A single amount column is only meaningful without debit/credit
    if cols.debit.is_some() || cols.credit.is_some() {
        cols.amount = None;
    }
    cols
}
