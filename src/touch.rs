//! Mobile viewport fixes: zoom suppression, drag locking, `--vh`.

#[cfg(test)]
#[path = "touch_test.rs"]
mod touch_test;

use crate::consts::{DOUBLE_TAP_WINDOW_MS, VIEWPORT_UNIT_FACTOR};

/// Viewport meta content that disables user scaling.
pub const LOCKED_VIEWPORT: &str = "width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no";

/// A touchstart with more than one finger starts a pinch.
#[must_use]
pub fn is_pinch(touch_count: u32) -> bool {
    touch_count > 1
}

/// Mostly-horizontal drags are blocked to stop sideways page scroll.
#[must_use]
pub fn is_horizontal_drag(dx: f64, dy: f64) -> bool {
    dx.abs() > dy.abs()
}

/// Elastic overscroll is blocked when the page has nothing to scroll.
#[must_use]
pub fn is_overscroll(scroll_height: f64, viewport_height: f64) -> bool {
    scroll_height <= viewport_height
}

/// One `--vh` unit in px for this viewport height.
#[must_use]
pub fn viewport_unit(inner_height: f64) -> f64 {
    inner_height * VIEWPORT_UNIT_FACTOR
}

/// Detects a second touch-end inside the double-tap window.
#[derive(Debug, Clone, Default)]
pub struct DoubleTapGuard {
    last_end_ms: Option<f64>,
}

impl DoubleTapGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a touch-end at `now_ms`; `true` means suppress it.
    pub fn on_touch_end(&mut self, now_ms: f64) -> bool {
        let is_double = self
            .last_end_ms
            .is_some_and(|last| now_ms - last <= DOUBLE_TAP_WINDOW_MS);
        self.last_end_ms = Some(now_ms);
        is_double
    }
}

/// Where the current touch began.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouchOrigin {
    pub x: f64,
    pub y: f64,
}
