//! Mobile navigation menu state machine.
//!
//! Two states, one transition function. Every way of closing the menu goes
//! through [`Menu::transition`], so the host applies identical side effects
//! no matter which trigger fired.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use crate::consts::{BREAKPOINT_PX, SWIPE_CLOSE_THRESHOLD_PX};

/// Whether the mobile panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    #[must_use]
    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    /// Icon class shown on the toggle in this state.
    #[must_use]
    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Closed => "fas fa-bars",
            Self::Open => "fas fa-times",
        }
    }

    /// Toggle background in this state.
    #[must_use]
    pub fn toggle_background(self) -> &'static str {
        match self {
            Self::Closed => "var(--primary)",
            Self::Open => "var(--danger)",
        }
    }
}

/// What asked the menu to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTrigger {
    /// The toggle control was activated.
    Toggle,
    /// A click landed outside both the panel and the toggle.
    OutsideClick,
    /// A link inside the panel was selected.
    LinkSelected,
    /// An in-page anchor is about to be scrolled to.
    AnchorNavigation,
    /// The viewport was resized.
    Resize,
    /// A downward swipe passed the close threshold.
    Swipe,
}

/// Whether `width` is at or below the mobile breakpoint.
#[must_use]
pub fn is_mobile(width: f64) -> bool {
    width <= BREAKPOINT_PX
}

/// Menu state plus the touch origin used for swipe-to-close.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    state: MenuState,
    touch_start_y: Option<f64>,
}

impl Menu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Apply `trigger` at the given viewport width.
    ///
    /// Returns the new state when it changed, `None` for a no-op.
    pub fn transition(&mut self, trigger: MenuTrigger, viewport_width: f64) -> Option<MenuState> {
        let mobile = is_mobile(viewport_width);
        let next = match (self.state, trigger) {
            (MenuState::Closed, MenuTrigger::Toggle) if mobile => MenuState::Open,
            (MenuState::Open, MenuTrigger::Toggle | MenuTrigger::AnchorNavigation | MenuTrigger::Swipe) => {
                MenuState::Closed
            }
            (MenuState::Open, MenuTrigger::OutsideClick | MenuTrigger::LinkSelected) if mobile => {
                MenuState::Closed
            }
            (MenuState::Open, MenuTrigger::Resize) if !mobile => MenuState::Closed,
            _ => return None,
        };
        self.state = next;
        Some(next)
    }

    /// Remember where a touch began.
    pub fn touch_started(&mut self, y: f64) {
        self.touch_start_y = Some(y);
    }

    /// Whether a touch at `y` has travelled far enough down to close the menu.
    #[must_use]
    pub fn is_closing_swipe(&self, y: f64) -> bool {
        self.state.is_open()
            && self
                .touch_start_y
                .is_some_and(|start| y - start > SWIPE_CLOSE_THRESHOLD_PX)
    }
}
