//! Landing page configuration.
//!
//! Every tunable constant of the page behaviour lives here. The browser layer
//! loads overrides from a `<script type="application/json" id="landing-config">`
//! block with `LandingConfig::from_json()`; any field left out keeps its default.

use std::time::Duration;

use serde::Deserialize;

use super::error::ConfigError;

/// Element id of the optional JSON configuration block in the host document
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

/// Landing page configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    /// Space kept free above an anchor target for the fixed header (px)
    pub header_offset: f64,

    /// Scroll offset after which the navbar switches to its solid style (px)
    pub navbar_solid_after: f64,

    /// Scroll offset after which the scroll-to-top button is shown (px)
    pub scroll_top_after: f64,

    /// Parallax speed added per orb; orb `i` moves at `(i + 1) * step`
    pub parallax_step: f64,

    /// Visible fraction that triggers a fade-in
    pub fade_threshold: f64,
    /// Root margin of the fade-in observer
    pub fade_root_margin: String,
    /// Delay between consecutive fade-ins of one batch (ms)
    pub fade_stagger_ms: u64,

    /// Visible fraction that starts a counter
    pub counter_threshold: f64,
    /// Total counter animation time (ms)
    pub counter_duration_ms: u64,
    /// Counter timer period (ms)
    pub counter_tick_ms: u64,

    /// Simulated booking backend latency (ms)
    pub submit_latency_ms: u64,
    /// How long a form message stays fully visible (ms)
    pub message_display_ms: u64,
    /// Fade-out time before a form message is removed (ms)
    pub message_exit_ms: u64,

    /// Maximum number of pointer trail samples
    pub trail_max_len: usize,
    /// Maximum pointer trail sample age relative to the newest sample (ms)
    pub trail_max_age_ms: f64,
    /// Trail is only recorded when the viewport is wider than this (px)
    pub trail_min_viewport_width: f64,

    /// Pointer offset from the card center is divided by this to get degrees
    pub tilt_divisor: f64,
    /// Animation delay added per testimonial card (s)
    pub testimonial_stagger_secs: f64,

    /// Periodically re-color the gradient orbs
    pub rotate_orb_gradients: bool,
    /// Orb re-color period (ms)
    pub orb_rotation_ms: u64,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            header_offset: 80.0,
            navbar_solid_after: 100.0,
            scroll_top_after: 300.0,
            parallax_step: 0.5,
            fade_threshold: 0.1,
            fade_root_margin: "0px 0px -50px 0px".to_string(),
            fade_stagger_ms: 100,
            counter_threshold: 0.5,
            counter_duration_ms: 2000,
            counter_tick_ms: 16,
            submit_latency_ms: 1500,
            message_display_ms: 5000,
            message_exit_ms: 300,
            trail_max_len: 10,
            trail_max_age_ms: 500.0,
            trail_min_viewport_width: 768.0,
            tilt_divisor: 10.0,
            testimonial_stagger_secs: 0.1,
            rotate_orb_gradients: false,
            orb_rotation_ms: 10_000,
        }
    }
}

impl LandingConfig {
    /// Parse a (possibly partial) JSON configuration over the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config = if json.trim().is_empty() {
            Self::default()
        } else {
            serde_json::from_str(json)?
        };
        tracing::debug!("Landing config loaded: {:?}", config);
        Ok(config)
    }

    pub fn fade_stagger(&self) -> Duration {
        Duration::from_millis(self.fade_stagger_ms)
    }

    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }

    pub fn counter_tick(&self) -> Duration {
        Duration::from_millis(self.counter_tick_ms)
    }

    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }

    pub fn message_display(&self) -> Duration {
        Duration::from_millis(self.message_display_ms)
    }

    pub fn message_exit(&self) -> Duration {
        Duration::from_millis(self.message_exit_ms)
    }

    pub fn orb_rotation(&self) -> Duration {
        Duration::from_millis(self.orb_rotation_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = LandingConfig::default();

        assert_eq!(config.header_offset, 80.0);
        assert_eq!(config.navbar_solid_after, 100.0);
        assert_eq!(config.scroll_top_after, 300.0);
        assert_eq!(config.counter_duration(), Duration::from_millis(2000));
        assert_eq!(config.counter_tick(), Duration::from_millis(16));
        assert_eq!(config.submit_latency(), Duration::from_millis(1500));
        assert_eq!(config.message_display(), Duration::from_millis(5000));
        assert_eq!(config.message_exit(), Duration::from_millis(300));
        assert_eq!(config.trail_max_len, 10);
        assert!(!config.rotate_orb_gradients);
    }

    #[test]
    fn test_from_json_partial_override() {
        let config =
            LandingConfig::from_json(r#"{"header_offset": 64, "rotate_orb_gradients": true}"#)
                .unwrap();

        assert_eq!(config.header_offset, 64.0);
        assert!(config.rotate_orb_gradients);
        // Untouched fields keep their defaults
        assert_eq!(config.fade_root_margin, "0px 0px -50px 0px");
        assert_eq!(config.submit_latency_ms, 1500);
    }

    #[test]
    fn test_from_json_empty_is_default() {
        assert_eq!(
            LandingConfig::from_json("  ").unwrap(),
            LandingConfig::default()
        );
        assert_eq!(
            LandingConfig::from_json("{}").unwrap(),
            LandingConfig::default()
        );
    }

    #[test]
    fn test_from_json_invalid() {
        let result = LandingConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_json_wrong_type() {
        let result = LandingConfig::from_json(r#"{"trail_max_len": "ten"}"#);
        assert!(result.is_err());
    }
}
