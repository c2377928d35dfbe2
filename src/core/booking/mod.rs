//! Consultation booking form
//!
//! Field model, fail-fast validation, live phone formatting and the
//! submission controller with its transient success/error messages.

pub mod controller;
pub mod phone;
pub mod record;
pub mod validation;

pub use controller::{
    BUSY_OPACITY, BookingController, BookingGateway, BookingTimings, FormSurface,
    MESSAGE_EXIT_STYLE, MessageId, MessageKind, PROCESSING_LABEL, SUCCESS_MESSAGE,
    SimulatedGateway, focus_transform, min_date_attr, min_preferred_date,
};
pub use phone::format_phone;
pub use record::{FormField, SubmissionRecord, humanize_field};
pub use validation::{is_valid_email, validate_submission};
