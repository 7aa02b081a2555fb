//! Phone field formatting
//!
//! Brazilian phone numbers are shown as `(DD) DDDD-DDDD` for landlines and
//! `(DD) DDDDD-DDDD` for mobiles. Formatting runs on every keystroke, so
//! partial input must pass through untouched until the groups are filled.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of digits kept from the input (2 area + 5 prefix + 4 suffix)
pub const MAX_PHONE_DIGITS: usize = 11;

/// Digit count of a landline number (4-digit prefix)
const LANDLINE_DIGITS: usize = 10;

/// Length of a fully formatted mobile number, used as the field input limit
pub const MAX_PHONE_LEN: usize = 15;

/// Example shown as the field placeholder and in the format error
pub const PHONE_EXAMPLE: &str = "(11) 99999-8888";

static FORMATTED_PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\([0-9]{2}\)\s[0-9]{4,5}-[0-9]{4}$").expect("phone pattern is valid")
});

/// Keep only ASCII digits, at most [`MAX_PHONE_DIGITS`] of them
pub fn phone_digits(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_PHONE_DIGITS)
        .collect()
}

/// Format raw phone input for display.
///
/// Ten digits become `(XX) XXXX-XXXX`, eleven become `(XX) XXXXX-XXXX`.
/// Fewer than ten digits are returned as bare digits, so the user sees
/// exactly what they typed while the number is incomplete.
pub fn format_phone(value: &str) -> String {
    let digits = phone_digits(value);

    let prefix_len = match digits.len() {
        n if n < LANDLINE_DIGITS => return digits,
        LANDLINE_DIGITS => 4,
        _ => 5,
    };

    let (area, rest) = digits.split_at(2);
    let (prefix, suffix) = rest.split_at(prefix_len);
    format!("({area}) {prefix}-{suffix}")
}

/// Check that a value is already in one of the two display formats
pub fn is_formatted_phone(value: &str) -> bool {
    FORMATTED_PHONE.is_match(value)
}
