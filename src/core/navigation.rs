//! Mobile menu state and in-page anchor navigation

/// Open/closed flags of the mobile menu.
///
/// The toggle button and the menu panel carry independent `active` flags;
/// toggling flips both, following a link closes both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    pub toggle_active: bool,
    pub menu_active: bool,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip both flags
    pub fn toggle(&mut self) -> Self {
        self.toggle_active = !self.toggle_active;
        self.menu_active = !self.menu_active;
        *self
    }

    /// Force both flags off
    pub fn close(&mut self) -> Self {
        self.toggle_active = false;
        self.menu_active = false;
        *self
    }

    pub fn is_open(&self) -> bool {
        self.menu_active
    }
}

/// What to do with a click on an in-page anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorAction {
    /// Leave the click alone (bare `#` link)
    Ignore,
    /// Cancel navigation; the target does not exist
    NoTarget,
    /// Cancel navigation and smooth-scroll to this document offset
    ScrollTo(f64),
}

impl AnchorAction {
    /// Whether the browser's default navigation must be cancelled
    pub fn prevents_default(&self) -> bool {
        !matches!(self, AnchorAction::Ignore)
    }
}

/// Resolve a click on an anchor with the given `href`.
///
/// `target_top` looks up the offset top of the element selected by `href`,
/// returning `None` when no such element exists.
pub fn anchor_action(
    href: &str,
    header_offset: f64,
    target_top: impl FnOnce(&str) -> Option<f64>,
) -> AnchorAction {
    if href == "#" {
        return AnchorAction::Ignore;
    }

    match target_top(href) {
        Some(top) => AnchorAction::ScrollTo(top - header_offset),
        None => {
            tracing::debug!("Anchor target {} not found", href);
            AnchorAction::NoTarget
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_starts_closed() {
        let state = MenuState::new();
        assert!(!state.toggle_active);
        assert!(!state.menu_active);
        assert!(!state.is_open());
    }

    #[test]
    fn test_toggle_flips_both_flags() {
        let mut state = MenuState::new();

        let opened = state.toggle();
        assert!(opened.toggle_active && opened.menu_active);

        let closed = state.toggle();
        assert!(!closed.toggle_active && !closed.menu_active);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut state = MenuState::new();
        state.toggle();

        assert_eq!(state.close(), MenuState::default());
        assert_eq!(state.close(), MenuState::default());
    }

    #[test]
    fn test_bare_hash_is_ignored() {
        let action = anchor_action("#", 80.0, |_| panic!("lookup must not run"));
        assert_eq!(action, AnchorAction::Ignore);
        assert!(!action.prevents_default());
    }

    #[test]
    fn test_anchor_scrolls_below_header() {
        let action = anchor_action("#booking", 80.0, |href| {
            assert_eq!(href, "#booking");
            Some(1200.0)
        });
        assert_eq!(action, AnchorAction::ScrollTo(1120.0));
        assert!(action.prevents_default());
    }

    #[test]
    fn test_missing_target_cancels_without_scroll() {
        let action = anchor_action("#nowhere", 80.0, |_| None);
        assert_eq!(action, AnchorAction::NoTarget);
        assert!(action.prevents_default());
    }

    #[test]
    fn test_target_near_top_gives_negative_offset() {
        let action = anchor_action("#hero", 80.0, |_| Some(20.0));
        assert_eq!(action, AnchorAction::ScrollTo(-60.0));
    }
}
