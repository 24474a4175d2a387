//! Row splitter for loosely-structured statement CSVs.
//!
//! Splitting is deliberately naive: lines on `\r?\n`, fields on every comma.
//! Quoted cells containing commas are NOT kept together.

use regex::Regex;
use std::sync::LazyLock;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n").expect("line break pattern is valid"));

/// A data row with its 1-based line number in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    pub line: usize,
    pub fields: Vec<&'a str>,
}

impl<'a> Row<'a> {
    /// Raw cell text; a missing column or short row reads as empty.
    pub fn cell(&self, index: Option<usize>) -> &'a str {
        index
            .and_then(|i| self.fields.get(i).copied())
            .unwrap_or("")
    }
}

/// Header plus data rows of a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitStatement<'a> {
    /// Lowercased, trimmed header cells
    pub header: Vec<String>,
    pub rows: Vec<Row<'a>>,
}

/// Split statement text into a header and data rows.
///
/// Returns `None` when fewer than two non-blank lines exist.
pub fn split_statement(text: &str) -> Option<SplitStatement<'_>> {
    let mut lines = LINE_BREAK
        .split(text)
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines.next()?;
    let rows: Vec<Row<'_>> = lines
        .map(|(i, line)| Row {
            line: i + 1,
            fields: line.split(',').collect(),
        })
        .collect();
    if rows.is_empty() {
        return None;
    }

    let header = header_line
        .trim_start_matches('\u{feff}')
        .split(',')
        .map(|cell| cell.trim().to_lowercase())
        .collect();

    Some(SplitStatement { header, rows })
}

/// Trim a cell and drop one layer of surrounding double quotes.
pub fn clean_cell(cell: &str) -> &str {
    let cell = cell.trim();
    cell.strip_prefix('"')
        .and_then(|c| c.strip_suffix('"'))
        .unwrap_or(cell)
        .trim()
}
