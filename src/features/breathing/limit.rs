//! Session time limits.

use std::num::NonZeroU32;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9]").unwrap_or_else(|e| panic!("Invalid digit regex: {e}")));

/// Optional session length in whole minutes. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeLimit(NonZeroU32);

impl TimeLimit {
    /// Create a limit; zero means "no limit".
    #[must_use]
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        NonZeroU32::new(minutes).map(Self)
    }

    /// Parse free-form user input after stripping everything but digits.
    ///
    /// Empty, zero, or out-of-range input yields `None`.
    #[must_use]
    pub fn parse_input(input: &str) -> Option<Self> {
        sanitize_digits(input)
            .parse::<u32>()
            .ok()
            .and_then(Self::from_minutes)
    }

    /// Limit in minutes.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0.get()
    }

    /// Limit in seconds.
    #[must_use]
    pub fn as_seconds(self) -> u64 {
        u64::from(self.0.get()) * 60
    }
}

impl std::fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let minutes = self.minutes();
        write!(f, "{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    }
}

/// Strip every non-digit character from `input`.
#[must_use]
pub fn sanitize_digits(input: &str) -> String {
    NON_DIGITS.replace_all(input, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minutes() {
        assert_eq!(TimeLimit::from_minutes(0), None);
        assert_eq!(TimeLimit::from_minutes(5).map(TimeLimit::minutes), Some(5));
        assert_eq!(TimeLimit::from_minutes(2).map(TimeLimit::as_seconds), Some(120));
    }

    #[test]
    fn test_parse_input_strips_non_digits() {
        assert_eq!(TimeLimit::parse_input("1a0"), TimeLimit::from_minutes(10));
        assert_eq!(TimeLimit::parse_input(" 5 min"), TimeLimit::from_minutes(5));
        assert_eq!(TimeLimit::parse_input("-3"), TimeLimit::from_minutes(3));
    }

    #[test]
    fn test_parse_input_empty_or_zero() {
        assert_eq!(TimeLimit::parse_input(""), None);
        assert_eq!(TimeLimit::parse_input("abc"), None);
        assert_eq!(TimeLimit::parse_input("00"), None);
        assert_eq!(TimeLimit::parse_input("99999999999"), None);
    }

    #[test]
    fn test_sanitize_digits() {
        assert_eq!(sanitize_digits("e.g., 5"), "5");
        assert_eq!(sanitize_digits("12x3"), "123");
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeLimit::from_minutes(1).unwrap().to_string(), "1 minute");
        assert_eq!(TimeLimit::from_minutes(10).unwrap().to_string(), "10 minutes");
    }
}
