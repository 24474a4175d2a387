//! Merchant guess from a statement description.

/// First whitespace-delimited token of the description, verbatim.
///
/// This is a heuristic, not a lookup: "UBER TRIP 452" gives "UBER",
/// "AMAZON.IN*ORDER" gives "AMAZON.IN*ORDER".
pub fn extract_merchant(description: &str) -> Option<String> {
    description.split_whitespace().next().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_token() {
        assert_eq!(extract_merchant("UBER TRIP 452").as_deref(), Some("UBER"));
        assert_eq!(extract_merchant("  swiggy   order ").as_deref(), Some("swiggy"));
    }

    #[test]
    fn test_no_normalization() {
        assert_eq!(extract_merchant("AMAZON.IN*ORDER 9").as_deref(), Some("AMAZON.IN*ORDER"));
    }

    #[test]
    fn test_blank_has_no_merchant() {
        assert_eq!(extract_merchant(""), None);
        assert_eq!(extract_merchant(" \t "), None);
    }
}
