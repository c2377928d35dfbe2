//! Error types shared by the landing page controllers

use super::booking::FormField;

/// Booking form validation failures.
///
/// The `Display` output is the message shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in the {} field.", .field.label())]
    MissingField { field: FormField },

    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Rejection reported by a booking backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct GatewayError {
    pub reason: String,
}

impl GatewayError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors returned when a booking submission is not started
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A submission is already being processed")]
    InFlight,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid landing config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_is_humanized() {
        let err = ValidationError::MissingField {
            field: FormField::CurrentRevenue,
        };
        assert_eq!(err.to_string(), "Please fill in the current revenue field.");
    }

    #[test]
    fn test_invalid_email_message() {
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Please enter a valid email address."
        );
    }

    #[test]
    fn test_booking_error_is_transparent() {
        let err: BookingError = ValidationError::InvalidEmail.into();
        assert_eq!(err.to_string(), "Please enter a valid email address.");
    }
}
