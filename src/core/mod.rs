//! Host-independent landing page behaviour
//!
//! Controllers and pure functions for every interactive feature of the page.
//! Nothing in here touches the DOM directly: timers go through
//! [`scheduler::Scheduler`] and DOM effects through small per-feature surface
//! traits, which the `ui` module implements on top of `web_sys`.

pub mod booking;
pub mod config;
pub mod counter;
pub mod error;
pub mod lazy_images;
pub mod navigation;
pub mod pointer;
pub mod reveal;
pub mod scheduler;
pub mod scroll_effects;

pub use config::LandingConfig;
pub use error::{BookingError, ConfigError, GatewayError, ValidationError};
pub use scheduler::{Scheduler, TaskControl, TaskId, VirtualScheduler};
