//! Live phone number formatting for the booking form

/// Maximum number of digits kept in a formatted number
pub const PHONE_DIGITS: usize = 10;

/// Reformat raw phone input as `(ddd) ddd-dddd`.
///
/// Every non-digit is dropped and punctuation is re-inserted progressively,
/// so partial input formats as the visitor types. Digits past the tenth are
/// discarded once the full pattern is reached.
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        0 => String::new(),
        1..=3 => format!("({}", digits),
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        len => format!(
            "({}) {}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..len.min(PHONE_DIGITS)]
        ),
    }
}
