//! Shared numeric constants for the page controllers.

// ── Layout ──────────────────────────────────────────────────────

/// Viewport width (logical px) at or below which the mobile menu is active.
pub const BREAKPOINT_PX: f64 = 768.0;

/// Navbar height used when no rendered navbar can be measured.
pub const NAVBAR_FALLBACK_HEIGHT_PX: f64 = 70.0;

/// Multiplier turning `innerHeight` into one `--vh` unit.
pub const VIEWPORT_UNIT_FACTOR: f64 = 0.01;

// ── Scroll ──────────────────────────────────────────────────────

/// Scroll offset past which the back-to-top control is shown.
pub const BACK_TO_TOP_THRESHOLD_PX: f64 = 300.0;

/// Offset added to `scrollY` when picking the active section.
pub const ACTIVE_SECTION_OFFSET_PX: f64 = 100.0;

// ── Touch ───────────────────────────────────────────────────────

/// Downward finger travel that closes an open mobile menu.
pub const SWIPE_CLOSE_THRESHOLD_PX: f64 = 50.0;

/// Two touch-ends closer than this count as a double tap.
pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;

// ── Delays ──────────────────────────────────────────────────────

/// Gap between showing the menu panel and applying its open class.
pub const MENU_OPEN_FRAME_MS: u32 = 10;

/// Time the close transition runs before the panel is hidden.
pub const MENU_HIDE_DELAY_MS: u32 = 300;

/// Pause between collapsing skill bars and growing them back.
pub const SKILL_BAR_DELAY_MS: u32 = 300;

/// Artificial latency of the simulated contact submission.
pub const SUBMIT_DELAY_MS: u32 = 1500;

/// How long a copied email link shows its acknowledgment.
pub const COPY_REVERT_MS: u32 = 2000;
