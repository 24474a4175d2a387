//! Date normalizer for bank exports.
//!
//! Never fails: anything unreadable becomes the ingestion date.
//!
//! Known limitation: when both day and month are <= 12 (e.g. `03/04/2024`)
//! the cell is read as day/month in the order given. The data alone cannot
//! tell `3 April` from `March 4`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("iso date pattern is valid"));

/// Formats tried after the positional and ISO passes, in order.
/// Two-digit-year variants precede their `%Y` twins so "01-Mar-24" is not
/// read as year 24.
const DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%Y-%m-%d",
    "%Y.%m.%d",
    "%d.%m.%Y",
    "%d-%b-%y",
    "%d-%b-%Y",
    "%d %b %y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%Y%m%d",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
];

/// Normalize a raw date cell, falling back to `today`.
pub fn normalize_date(raw: &str, today: NaiveDate) -> NaiveDate {
    let cleaned: String = raw.chars().filter(|c| *c != '"' && *c != '\'').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return today;
    }

    if let Some(date) = parse_positional(cleaned) {
        return date;
    }

    if ISO_DATE.is_match(cleaned) {
        if let Ok(date) = NaiveDate::parse_from_str(cleaned, "%Y-%m-%d") {
            return date;
        }
    }

    parse_known_formats(cleaned).unwrap_or(today)
}

/// `a/b/c` or `a-b-c`, read as day, month, year.
fn parse_positional(s: &str) -> Option<NaiveDate> {
    let sep = if s.contains('/') {
        '/'
    } else if s.contains('-') {
        '-'
    } else {
        return None;
    };

    let parts: Vec<&str> = s.split(sep).map(str::trim).collect();
    let [a, b, c] = parts.as_slice() else {
        return None;
    };

    let first: u32 = a.parse().ok()?;
    let second: u32 = b.parse().ok()?;
    if !c.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    let year: i32 = match c.len() {
        2 => format!("20{c}").parse().ok()?,
        4 => c.parse().ok()?,
        _ => return None,
    };

    // Whichever part exceeds 12 has to be the day
    let (day, month) = if first > 12 && second <= 12 {
        (first, second)
    } else if second > 12 && first <= 12 {
        (second, first)
    } else {
        (first, second)
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_known_formats(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn norm(raw: &str) -> String {
        normalize_date(raw, today()).to_string()
    }

    #[test]
    fn test_day_first_slash() {
        assert_eq!(norm("31/01/2024"), "2024-01-31");
    }

    #[test]
    fn test_ambiguous_two_digit_year_keeps_order() {
        assert_eq!(norm("01-02-24"), "2024-02-01");
        assert_eq!(norm("03/04/2024"), "2024-04-03");
    }

    #[test]
    fn test_month_first_export_is_swapped() {
        assert_eq!(norm("01/31/2024"), "2024-01-31");
    }

    #[test]
    fn test_iso_unchanged() {
        assert_eq!(norm("2024-03-15"), "2024-03-15");
        assert_eq!(norm(" \"2024-03-15\" "), "2024-03-15");
    }

    #[test]
    fn test_garbage_falls_back_to_today() {
        assert_eq!(norm("not-a-date"), "2026-10-18");
        assert_eq!(norm(""), "2026-10-18");
        assert_eq!(norm("\"\""), "2026-10-18");
        assert_eq!(norm("31/31/2024"), "2026-10-18");
        assert_eq!(norm("2024-13-45"), "2026-10-18");
    }

    #[test]
    fn test_impossible_calendar_day_falls_back() {
        assert_eq!(norm("30/02/2024"), "2026-10-18");
        assert_eq!(norm("29/02/2024"), "2024-02-29");
    }

    #[test]
    fn test_general_formats() {
        assert_eq!(norm("2024/03/15"), "2024-03-15");
        assert_eq!(norm("15.03.2024"), "2024-03-15");
        assert_eq!(norm("15 Mar 2024"), "2024-03-15");
        assert_eq!(norm("01-Mar-24"), "2024-03-01");
        assert_eq!(norm("15-Mar-2024"), "2024-03-15");
        assert_eq!(norm("March 15, 2024"), "2024-03-15");
        assert_eq!(norm("20240315"), "2024-03-15");
        assert_eq!(norm("2024-03-15T10:30:00+05:30"), "2024-03-15");
        assert_eq!(norm("2024-03-15 10:30:00"), "2024-03-15");
    }

    #[test]
    fn test_unpadded_iso_and_minute_timestamps() {
        assert_eq!(norm("2024-3-5"), "2024-03-05");
        assert_eq!(norm("31/01/2024 10:30"), "2024-01-31");
        assert_eq!(norm("31-01-2024 10:30:15"), "2024-01-31");
        assert_eq!(norm("2024-03-15 10:30"), "2024-03-15");
    }

    #[test]
    fn test_single_quotes_and_padding() {
        assert_eq!(norm("  '05/06/23'  "), "2023-06-05");
    }
}
