//! Scroll-reactive visual effects: navbar style, orb parallax and the
//! scroll-to-top button.
//!
//! All functions here are recomputed from the current scroll offset on every
//! scroll event; nothing is throttled or remembered between events.

/// Navbar appearance for a scroll offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarStyle {
    /// Page is near the top
    Transparent,
    /// Page has been scrolled past the threshold
    Solid,
}

impl NavbarStyle {
    /// Style for `offset`; strictly greater than `threshold` is solid
    pub fn for_offset(offset: f64, threshold: f64) -> Self {
        if offset > threshold {
            NavbarStyle::Solid
        } else {
            NavbarStyle::Transparent
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            NavbarStyle::Transparent => "rgba(10, 10, 15, 0.8)",
            NavbarStyle::Solid => "rgba(10, 10, 15, 0.95)",
        }
    }

    pub fn box_shadow(&self) -> &'static str {
        match self {
            NavbarStyle::Transparent => "none",
            NavbarStyle::Solid => "0 4px 30px rgba(0, 0, 0, 0.3)",
        }
    }
}

/// Vertical parallax translation (px) of the orb at `index`
pub fn parallax_offset(scroll: f64, index: usize, step: f64) -> f64 {
    let speed = (index + 1) as f64 * step;
    let y = -(scroll * speed);
    // Avoid rendering "-0px"
    if y == 0.0 { 0.0 } else { y }
}

/// CSS transform for a vertical translation
pub fn translate_y(y: f64) -> String {
    format!("translateY({}px)", y)
}

/// Parallax transforms for `count` orbs at the given scroll offset
pub fn parallax_transforms(scroll: f64, count: usize, step: f64) -> Vec<String> {
    (0..count)
        .map(|index| translate_y(parallax_offset(scroll, index, step)))
        .collect()
}

/// Scroll-to-top button presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollTopButton {
    pub visible: bool,
    pub hovered: bool,
}

impl ScrollTopButton {
    /// Base inline style of the button, without the state-dependent parts
    pub const BASE_STYLE: &'static str = "position: fixed; bottom: 30px; right: 30px; \
        width: 50px; height: 50px; border-radius: 50%; \
        background: linear-gradient(135deg, #667EEA 0%, #764BA2 100%); color: white; \
        border: none; cursor: pointer; align-items: center; justify-content: center; \
        transition: all 0.3s ease; z-index: 999;";

    /// Update visibility from the scroll offset. Returns true when it changed.
    pub fn on_scroll(&mut self, offset: f64, threshold: f64) -> bool {
        let visible = offset > threshold;
        let changed = visible != self.visible;
        self.visible = visible;
        changed
    }

    pub fn display(&self) -> &'static str {
        if self.visible { "flex" } else { "none" }
    }

    pub fn transform(&self) -> &'static str {
        if self.hovered {
            "translateY(-5px) scale(1.1)"
        } else {
            "translateY(0) scale(1)"
        }
    }

    pub fn box_shadow(&self) -> &'static str {
        if self.hovered {
            "0 6px 20px rgba(102, 126, 234, 0.6)"
        } else {
            "0 4px 15px rgba(102, 126, 234, 0.4)"
        }
    }

    /// Full inline style for the current state
    pub fn style(&self) -> String {
        format!(
            "{} display: {}; transform: {}; box-shadow: {};",
            Self::BASE_STYLE,
            self.display(),
            self.transform(),
            self.box_shadow()
        )
    }
}

/// Gradients the orbs rotate through when re-coloring is enabled
pub const ORB_GRADIENTS: [&str; 4] = [
    "linear-gradient(135deg, #667EEA 0%, #764BA2 100%)",
    "linear-gradient(135deg, #F093FB 0%, #F5576C 100%)",
    "linear-gradient(135deg, #4FACFE 0%, #00F2FE 100%)",
    "linear-gradient(135deg, #43E97B 0%, #38F9D7 100%)",
];

/// Pick a gradient from a uniform sample in `[0, 1)`
pub fn pick_orb_gradient(sample: f64) -> &'static str {
    let index = (sample.clamp(0.0, 1.0) * ORB_GRADIENTS.len() as f64) as usize;
    ORB_GRADIENTS[index.min(ORB_GRADIENTS.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navbar_threshold_crossing() {
        assert_eq!(NavbarStyle::for_offset(99.0, 100.0), NavbarStyle::Transparent);
        assert_eq!(NavbarStyle::for_offset(101.0, 100.0), NavbarStyle::Solid);
        assert_eq!(NavbarStyle::for_offset(99.0, 100.0), NavbarStyle::Transparent);
    }

    #[test]
    fn test_navbar_threshold_is_exclusive() {
        assert_eq!(NavbarStyle::for_offset(100.0, 100.0), NavbarStyle::Transparent);
    }

    #[test]
    fn test_navbar_styles_differ() {
        assert_eq!(NavbarStyle::Solid.background(), "rgba(10, 10, 15, 0.95)");
        assert_eq!(NavbarStyle::Solid.box_shadow(), "0 4px 30px rgba(0, 0, 0, 0.3)");
        assert_eq!(NavbarStyle::Transparent.background(), "rgba(10, 10, 15, 0.8)");
        assert_eq!(NavbarStyle::Transparent.box_shadow(), "none");
    }

    #[test]
    fn test_parallax_speed_grows_with_index() {
        assert_eq!(parallax_offset(200.0, 0, 0.5), -100.0);
        assert_eq!(parallax_offset(200.0, 1, 0.5), -200.0);
        assert_eq!(parallax_offset(200.0, 2, 0.5), -300.0);
    }

    #[test]
    fn test_parallax_at_top_has_no_negative_zero() {
        assert_eq!(translate_y(parallax_offset(0.0, 0, 0.5)), "translateY(0px)");
    }

    #[test]
    fn test_parallax_transforms() {
        let transforms = parallax_transforms(101.0, 2, 0.5);
        assert_eq!(transforms, vec!["translateY(-50.5px)", "translateY(-101px)"]);
    }

    #[test]
    fn test_scroll_top_visibility() {
        let mut button = ScrollTopButton::default();
        assert_eq!(button.display(), "none");

        assert!(!button.on_scroll(300.0, 300.0));
        assert!(button.on_scroll(301.0, 300.0));
        assert_eq!(button.display(), "flex");

        assert!(!button.on_scroll(900.0, 300.0));
        assert!(button.on_scroll(0.0, 300.0));
        assert_eq!(button.display(), "none");
    }

    #[test]
    fn test_scroll_top_hover() {
        let mut button = ScrollTopButton::default();
        assert_eq!(button.transform(), "translateY(0) scale(1)");

        button.hovered = true;
        assert_eq!(button.transform(), "translateY(-5px) scale(1.1)");
        assert!(button.style().contains("box-shadow: 0 6px 20px rgba(102, 126, 234, 0.6)"));
    }

    #[test]
    fn test_pick_orb_gradient_bounds() {
        assert_eq!(pick_orb_gradient(0.0), ORB_GRADIENTS[0]);
        assert_eq!(pick_orb_gradient(0.49), ORB_GRADIENTS[1]);
        assert_eq!(pick_orb_gradient(0.999), ORB_GRADIENTS[3]);
        assert_eq!(pick_orb_gradient(1.0), ORB_GRADIENTS[3]);
    }
}
