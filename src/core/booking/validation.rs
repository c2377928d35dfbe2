//! Client-side validation of booking submissions.
//!
//! Validation is fail-fast: required fields are checked in form order and the
//! first blank one is reported, then the email shape is checked.

use std::sync::LazyLock;

use regex::Regex;

use super::record::{FormField, SubmissionRecord};
use crate::core::error::ValidationError;

/// Basic `local@domain.tld` shape, no whitespace anywhere.
/// U+FEFF is listed explicitly: browsers count it as whitespace, `\s` does not.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$")
        .expect("email pattern is valid")
});

/// Whitespace as the browser trims it
fn is_form_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Check that `email` looks like an address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Validate a submission record.
pub fn validate_submission(record: &SubmissionRecord) -> Result<(), ValidationError> {
    for field in FormField::REQUIRED {
        let filled = record
            .get(field)
            .is_some_and(|value| !value.trim_matches(is_form_whitespace).is_empty());
        if !filled {
            return Err(ValidationError::MissingField { field });
        }
    }

    // Checked untrimmed: surrounding whitespace makes the address invalid
    let email = record.get(FormField::Email).unwrap_or_default();
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}
