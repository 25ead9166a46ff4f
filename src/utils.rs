//! Utility functions for text normalization and log formatting.
//!
//! This module provides helper functions used throughout the application:
//! - Whitespace normalization for extracted article text
//! - String truncation for log previews
//! - Decimal rounding for score proportions

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("static whitespace pattern is valid"));

/// Collapse every run of whitespace into a single space and trim the ends.
///
/// Newlines, tabs and non-breaking spaces count as whitespace.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(collapse_whitespace("  a\n\t b  "), "a b");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes, backing off to the
/// nearest character boundary, with an ellipsis and byte count appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Round to three decimal places.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace_mixed_runs() {
        assert_eq!(
            collapse_whitespace("\n\tGood   news\ttoday.\n\n Everyone  is happy. \t"),
            "Good news today. Everyone is happy."
        );
    }

    #[test]
    fn test_collapse_whitespace_unicode_spaces() {
        assert_eq!(collapse_whitespace("a\u{a0}\u{a0}b\u{2003}c"), "a b c");
    }

    #[test]
    fn test_collapse_whitespace_only_whitespace() {
        assert_eq!(collapse_whitespace(" \n\t "), "");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_collapse_whitespace_never_leaves_double_spaces() {
        let inputs = ["a  b", "a\n\nb", "a\t \tb", " a b ", "x\r\n y"];
        for input in inputs {
            let out = collapse_whitespace(input);
            assert!(!out.contains("  "), "{out:?}");
            assert_eq!(out, out.trim());
        }
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        // 'é' is two bytes; cutting at 3 would split the second one
        let result = truncate_for_log("éééé", 3);
        assert_eq!(result, "é…(+6 bytes)");
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.12345), 0.123);
        assert_eq!(round3(0.9996), 1.0);
        assert_eq!(round3(-0.0004), 0.0);
    }
}
