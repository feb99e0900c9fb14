//! Individual rule predicates
//!
//! Each function answers one question about a value. Ordering and message
//! selection live in [`crate::engine`].

use once_cell::sync::Lazy;
use regex::Regex;

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0[1-9]|[12][0-9]|3[01])/(0[1-9]|1[012])/(19|20)[0-9]{2}$")
        .expect("date pattern is valid")
});

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9_.-])+@(([a-zA-Z0-9-])+\.)+([a-zA-Z0-9]{2,4})+$")
        .expect("email pattern is valid")
});

/// Minimum number of digits in a phone number
pub const MIN_PHONE_LENGTH: usize = 11;

/// Removes every space and period
pub fn strip_spaces_and_periods(value: &str) -> String {
    value.chars().filter(|c| *c != ' ' && *c != '.').collect()
}

/// Length is counted in characters, not bytes
pub fn has_exact_length(value: &str, length: usize) -> bool {
    value.chars().count() == length
}

/// `DD/MM/YYYY` with a 19xx or 20xx year
pub fn is_valid_date(value: &str) -> bool {
    DATE_PATTERN.is_match(value)
}

/// Case-insensitive equality with the related field's value
pub fn matches_ignore_case(value: &str, other: &str) -> bool {
    value.to_lowercase() == other.to_lowercase()
}

/// Whether the value reads as a number; blank and the words `NaN`/`inf` do not
pub fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.bytes().any(|b| b.is_ascii_digit()) && trimmed.parse::<f64>().is_ok()
}

/// Numeric and finite; rejects `NaN` and infinities
pub fn is_finite_number(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// Case-sensitive prefix check
pub fn has_prefix(value: &str, prefix: &str) -> bool {
    value.len() >= prefix.len() && value.starts_with(prefix)
}

pub fn is_valid_email(value: &str) -> bool {
    !value.is_empty() && EMAIL_PATTERN.is_match(value)
}

/// At least [`MIN_PHONE_LENGTH`] characters, all ASCII digits
pub fn is_valid_phone(value: &str) -> bool {
    value.chars().count() >= MIN_PHONE_LENGTH && value.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip() {
        assert_eq!(strip_spaces_and_periods("AB 12. 3.4"), "AB1234");
        assert_eq!(strip_spaces_and_periods("..."), "");
    }

    #[test]
    fn test_exact_length() {
        assert!(has_exact_length("abcde", 5));
        assert!(!has_exact_length("abcd", 5));
        assert!(!has_exact_length("abcdef", 5));
        assert!(has_exact_length("žluť", 4));
    }

    #[test]
    fn test_date_format() {
        assert!(is_valid_date("31/12/2023"));
        assert!(is_valid_date("01/01/1900"));
        assert!(!is_valid_date("32/01/2023"));
        assert!(!is_valid_date("2023/12/31"));
        assert!(!is_valid_date("00/00/0000"));
        assert!(!is_valid_date("15/13/2020"));
        assert!(!is_valid_date("15/12/2120"));
        assert!(!is_valid_date("1/12/2020"));
    }

    #[test]
    fn test_case_insensitive_match() {
        assert!(matches_ignore_case("Secret", "secret"));
        assert!(!matches_ignore_case("Secret", "secrets"));
    }

    #[test]
    fn test_numeric() {
        assert!(is_numeric("42"));
        assert!(is_numeric(" 3.5 "));
        assert!(is_numeric("-1e3"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("12abc"));
        assert!(!is_numeric("Nan"));
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("-Infinity"));

        assert!(is_finite_number("3.14"));
        assert!(!is_finite_number("inf"));
        assert!(!is_finite_number("NaN"));
        assert!(!is_finite_number("abc"));
    }

    #[test]
    fn test_prefix() {
        assert!(has_prefix("ENG123", "EN"));
        assert!(!has_prefix("en123", "EN"));
        assert!(!has_prefix("E", "EN"));
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a.com"));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn test_phone() {
        assert!(is_valid_phone("12345678901"));
        assert!(is_valid_phone("012345678901"));
        assert!(!is_valid_phone("1234567890"));
        assert!(!is_valid_phone("123456789ab"));
        assert!(!is_valid_phone("+4412345678"));
    }
}
