//! Booking form submission and transient form messages
//!
//! # Overview
//!
//! A submission goes through three steps:
//! 1. Validation (fail-fast). A failure shows an error message and stops.
//! 2. Busy state: the submit button is disabled while the booking gateway
//!    "processes" the request after a fixed latency.
//! 3. Outcome: success shows a confirmation and clears the form, failure
//!    shows the gateway's reason. The submit button is restored either way.
//!
//! At most one message is attached to the form. It fades out after the
//! display time and is removed once the exit transition is over.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveDate;

use super::record::SubmissionRecord;
use super::validation::validate_submission;
use crate::core::config::LandingConfig;
use crate::core::error::{BookingError, GatewayError};
use crate::core::scheduler::{Scheduler, TaskId};

/// Confirmation shown after a successful submission
pub const SUCCESS_MESSAGE: &str = "Thank you! We'll confirm your consultation within 24 hours.";

/// Submit button content while a submission is processed
pub const PROCESSING_LABEL: &str = "<span>Processing...</span>";

/// Submit button opacity while a submission is processed
pub const BUSY_OPACITY: &str = "0.7";

/// Identifier of a form message
pub type MessageId = u64;

/// Form message flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }

    /// Class list of the message element
    pub fn class_name(&self) -> String {
        format!("form-message form-message-{}", self.as_str())
    }

    /// Inline style of the message element
    pub fn style(&self) -> &'static str {
        match self {
            MessageKind::Success => {
                "padding: 1rem; margin-top: 1rem; border-radius: 12px; font-weight: 500; \
                 text-align: center; animation: fadeInUp 0.3s ease-out; \
                 backdrop-filter: blur(10px); background: rgba(67, 233, 123, 0.2); color: #43E97B; \
                 border: 1px solid rgba(67, 233, 123, 0.3);"
            }
            MessageKind::Error => {
                "padding: 1rem; margin-top: 1rem; border-radius: 12px; font-weight: 500; \
                 text-align: center; animation: fadeInUp 0.3s ease-out; \
                 backdrop-filter: blur(10px); background: rgba(236, 72, 153, 0.2); color: #EC4899; \
                 border: 1px solid rgba(236, 72, 153, 0.3);"
            }
        }
    }
}

/// Inline style of a message during its exit transition
pub const MESSAGE_EXIT_STYLE: [(&str, &str); 2] =
    [("opacity", "0"), ("transform", "translateY(-10px)")];

/// Earliest selectable consultation date: the day after `today`
pub fn min_preferred_date(today: NaiveDate) -> NaiveDate {
    today.succ_opt().unwrap_or(today)
}

/// `min` attribute value for the preferred date input
pub fn min_date_attr(today: NaiveDate) -> String {
    min_preferred_date(today).format("%Y-%m-%d").to_string()
}

/// Transform of a form control's wrapper while the control has focus
pub fn focus_transform(focused: bool) -> &'static str {
    if focused { "scale(1.02)" } else { "scale(1)" }
}

/// DOM side of the booking form
pub trait FormSurface {
    /// Enter (`true`) or leave the processing state of the submit button
    fn set_busy(&self, busy: bool);
    /// Clear every form control
    fn reset(&self);
    /// Append a message element to the form
    fn attach_message(&self, id: MessageId, kind: MessageKind, text: &str);
    /// Start the exit transition of a message
    fn fade_message(&self, id: MessageId);
    /// Detach a message element
    fn remove_message(&self, id: MessageId);
}

/// Backend receiving accepted booking requests
pub trait BookingGateway {
    fn deliver(&self, record: &SubmissionRecord) -> Result<(), GatewayError>;
}

/// Local stand-in for a booking backend; accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedGateway;

impl BookingGateway for SimulatedGateway {
    fn deliver(&self, record: &SubmissionRecord) -> Result<(), GatewayError> {
        tracing::debug!("Simulated booking delivered ({} fields)", record.len());
        Ok(())
    }
}

/// Durations driving the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingTimings {
    pub latency: Duration,
    pub display: Duration,
    pub exit: Duration,
}

impl BookingTimings {
    pub fn from_config(config: &LandingConfig) -> Self {
        Self {
            latency: config.submit_latency(),
            display: config.message_display(),
            exit: config.message_exit(),
        }
    }
}

impl Default for BookingTimings {
    fn default() -> Self {
        Self::from_config(&LandingConfig::default())
    }
}

struct BookingInner<S, G> {
    surface: S,
    gateway: G,
    scheduler: Rc<dyn Scheduler>,
    timings: BookingTimings,
    active_message: Cell<Option<MessageId>>,
    next_message_id: Cell<MessageId>,
    in_flight: Cell<bool>,
    // Pending timer of the submission in flight
    submission: Cell<Option<TaskId>>,
    // Pending fade or removal timer of the active message
    message_timer: Cell<Option<TaskId>>,
}

impl<S: FormSurface + 'static, G: BookingGateway + 'static> BookingInner<S, G> {
    fn show_message(self: &Rc<Self>, kind: MessageKind, text: &str) -> MessageId {
        if let Some(previous) = self.active_message.take() {
            self.surface.remove_message(previous);
        }
        if let Some(timer) = self.message_timer.take() {
            self.scheduler.cancel(timer);
        }

        let id = self.next_message_id.get();
        self.next_message_id.set(id + 1);
        self.surface.attach_message(id, kind, text);
        self.active_message.set(Some(id));

        let inner = Rc::clone(self);
        let fade = self.scheduler.set_timeout(
            self.timings.display,
            Box::new(move || {
                // Replaced messages are already gone
                if inner.active_message.get() != Some(id) {
                    return;
                }
                inner.surface.fade_message(id);

                let remover = Rc::clone(&inner);
                let remove = inner.scheduler.set_timeout(
                    inner.timings.exit,
                    Box::new(move || {
                        if remover.active_message.get() == Some(id) {
                            remover.active_message.set(None);
                            remover.message_timer.set(None);
                            remover.surface.remove_message(id);
                        }
                    }),
                );
                inner.message_timer.set(Some(remove));
            }),
        );
        self.message_timer.set(Some(fade));

        id
    }

    fn complete(self: &Rc<Self>, record: &SubmissionRecord) {
        self.submission.set(None);
        match self.gateway.deliver(record) {
            Ok(()) => {
                tracing::info!("Booking request confirmed");
                self.show_message(MessageKind::Success, SUCCESS_MESSAGE);
                self.surface.reset();
            }
            Err(err) => {
                tracing::warn!("Booking request rejected: {}", err);
                self.show_message(MessageKind::Error, &err.to_string());
            }
        }
        self.surface.set_busy(false);
        self.in_flight.set(false);
    }
}

/// Booking form controller.
pub struct BookingController<S, G = SimulatedGateway> {
    inner: Rc<BookingInner<S, G>>,
}

impl<S: FormSurface + 'static, G: BookingGateway + 'static> BookingController<S, G> {
    pub fn new(
        surface: S,
        gateway: G,
        scheduler: Rc<dyn Scheduler>,
        timings: BookingTimings,
    ) -> Self {
        Self {
            inner: Rc::new(BookingInner {
                surface,
                gateway,
                scheduler,
                timings,
                active_message: Cell::new(None),
                next_message_id: Cell::new(0),
                in_flight: Cell::new(false),
                submission: Cell::new(None),
                message_timer: Cell::new(None),
            }),
        }
    }

    /// Handle a form submission.
    ///
    /// Returns an error when the submission was not started; validation
    /// failures have already been shown to the visitor at that point.
    pub fn submit(&self, record: SubmissionRecord) -> Result<(), BookingError> {
        if self.inner.in_flight.get() {
            tracing::debug!("Ignoring submit while a booking is in flight");
            return Err(BookingError::InFlight);
        }

        if let Err(err) = validate_submission(&record) {
            tracing::debug!("Booking form invalid: {}", err);
            self.inner.show_message(MessageKind::Error, &err.to_string());
            return Err(err.into());
        }

        self.inner.in_flight.set(true);
        self.inner.surface.set_busy(true);

        let inner = Rc::clone(&self.inner);
        let id = self.inner.scheduler.set_timeout(
            self.inner.timings.latency,
            Box::new(move || inner.complete(&record)),
        );
        self.inner.submission.set(Some(id));
        Ok(())
    }

    /// Show a message, replacing the current one
    pub fn show_message(&self, kind: MessageKind, text: &str) -> MessageId {
        self.inner.show_message(kind, text)
    }

    /// The message currently attached to the form
    pub fn active_message(&self) -> Option<MessageId> {
        self.inner.active_message.get()
    }

    pub fn is_submitting(&self) -> bool {
        self.inner.in_flight.get()
    }

    /// Cancel every pending timer and take down the active message.
    ///
    /// A submission in flight is abandoned without reaching the gateway and
    /// the submit button is restored.
    pub fn dispose(&self) {
        let inner = &self.inner;
        if let Some(id) = inner.submission.take() {
            inner.scheduler.cancel(id);
        }
        if let Some(id) = inner.message_timer.take() {
            inner.scheduler.cancel(id);
        }
        if let Some(id) = inner.active_message.take() {
            inner.surface.remove_message(id);
        }
        if inner.in_flight.replace(false) {
            inner.surface.set_busy(false);
        }
    }
}
