//! Pointer-driven decorative effects: card tilt, testimonial stagger and
//! the pointer trail.

use std::collections::VecDeque;

/// Transition applied when the pointer enters a card
pub const TILT_TRANSITION: &str = "all 0.3s cubic-bezier(0.4, 0, 0.2, 1)";

/// Transform of a card the pointer is not over
pub const NEUTRAL_TRANSFORM: &str = "perspective(1000px) rotateX(0) rotateY(0) translateY(0)";

/// Bounding box of a card in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Rotation of a card under the pointer, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    /// Tilt for a pointer at (`client_x`, `client_y`) over `rect`.
    ///
    /// The vertical distance from the center drives the X rotation, the
    /// horizontal distance drives the Y rotation with its sign inverted.
    pub fn from_pointer(rect: &CardRect, client_x: f64, client_y: f64, divisor: f64) -> Self {
        let x = client_x - rect.left;
        let y = client_y - rect.top;
        let center_x = rect.width / 2.0;
        let center_y = rect.height / 2.0;

        Self {
            rotate_x: (y - center_y) / divisor,
            rotate_y: (center_x - x) / divisor,
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg) translateY(-10px)",
            self.rotate_x, self.rotate_y
        )
    }
}

/// `animation-delay` of the testimonial card at `index`
pub fn stagger_delay(index: usize, step_secs: f64) -> String {
    format!("{}s", index as f64 * step_secs)
}

/// One recorded pointer position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub x: f64,
    pub y: f64,
    /// Milliseconds since the epoch
    pub time: f64,
}

/// Bounded trail of recent pointer positions, most recent last.
///
/// # Example
/// ```
/// # use landing_interactions::core::pointer::PointerTrail;
/// let mut trail = PointerTrail::new(10, 500.0, 768.0);
///
/// trail.record(10.0, 10.0, 1_000.0, 1280.0);
/// trail.record(12.0, 11.0, 1_600.0, 1280.0);
///
/// // The first sample is more than 500ms older than the newest one
/// assert_eq!(trail.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PointerTrail {
    points: VecDeque<TrailPoint>,
    max_len: usize,
    max_age_ms: f64,
    min_viewport_width: f64,
}

impl PointerTrail {
    pub fn new(max_len: usize, max_age_ms: f64, min_viewport_width: f64) -> Self {
        Self {
            points: VecDeque::with_capacity(max_len + 1),
            max_len,
            max_age_ms,
            min_viewport_width,
        }
    }

    /// Record a pointer sample taken at `now` (ms).
    ///
    /// Ignored on viewports not wider than the minimum width. Returns whether
    /// the sample was recorded.
    pub fn record(&mut self, x: f64, y: f64, now: f64, viewport_width: f64) -> bool {
        if viewport_width <= self.min_viewport_width {
            return false;
        }

        self.points.push_back(TrailPoint { x, y, time: now });
        while self.points.len() > self.max_len {
            self.points.pop_front();
        }
        self.points.retain(|point| now - point.time < self.max_age_ms);
        true
    }

    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<&TrailPoint> {
        self.points.back()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
