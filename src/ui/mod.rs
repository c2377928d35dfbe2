//! Browser bindings
//!
//! Each feature implements [`dom::Feature`] and wires one of the `core`
//! controllers to the live page through `web_sys`.

pub mod booking;
pub mod dom;
pub mod form_message;
pub mod lazy_images;
pub mod navigation;
pub mod observer;
pub mod pointer;
pub mod reveal;
pub mod scroll_effects;
pub mod scroll_top;
pub mod timers;

pub use booking::BookingFeature;
pub use dom::{Feature, HostError};
pub use lazy_images::LazyImagesFeature;
pub use navigation::NavigationFeature;
pub use pointer::PointerFeature;
pub use reveal::RevealFeature;
pub use scroll_effects::ScrollEffectsFeature;
pub use timers::BrowserScheduler;
