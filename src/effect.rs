//! Host-side mutations requested by [`crate::site::SiteCore`].
//!
//! The core never touches the DOM. Every handler returns a list of effects,
//! applied in order by the browser host (or inspected by tests).

use crate::menu::MenuState;
use crate::scheduler::Task;
use crate::theme::Theme;

/// One mutation the host must perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Cancel the browser's default handling of the current event.
    PreventDefault,
    /// Stop the current event from bubbling further.
    StopPropagation,

    // --- Menu ---
    /// Toggle display of the menu toggle and panel for mobile or desktop.
    SetMenuLayout { mobile: bool, panel_visible: bool },
    /// Make the menu panel displayable ahead of its open transition.
    ShowMenuPanel,
    /// Hide the menu panel once its close transition has finished.
    HideMenuPanel,
    /// Reflect the menu state in panel class, body lock, and toggle icon.
    SetMenuState(MenuState),

    // --- Theme ---
    /// Add or remove the dark class.
    ApplyTheme(Theme),
    /// Write the theme string to storage.
    PersistTheme(Theme),

    // --- Scroll ---
    /// Smooth-scroll the window to a vertical offset.
    ScrollTo { top: f64 },
    /// Replace the URL fragment without jumping.
    ReplaceFragment(String),
    /// Show or hide the back-to-top control.
    SetBackToTopVisible(bool),
    /// Mark the nav link for `#id` active, or clear all when `None`.
    SetActiveNav(Option<String>),

    // --- Reveal ---
    /// Add the reveal class to the section at this index.
    RevealSection(usize),
    /// Capture skill-bar widths and collapse them to zero.
    CollapseSkillBars,
    /// Restore the captured skill-bar widths.
    RestoreSkillBars,

    // --- Contact form ---
    /// Error border on every `false` entry, cleared on every `true` entry.
    MarkFields(Vec<bool>),
    /// Blocking user-facing message.
    Alert(String),
    /// Disable the submit control and show the spinner, or restore it.
    SetSubmitBusy(bool),
    /// Clear every form field.
    ResetForm,

    // --- Email ---
    /// Write an address to the clipboard for the email link at this index.
    CopyToClipboard { link: usize, address: String },
    /// Swap the link label for the copy acknowledgment.
    ShowCopied { link: usize },
    /// Put the link's original label back.
    RestoreLinkLabel { link: usize },

    // --- Misc ---
    /// Write the year into the footer.
    SetFooterYear(u32),
    /// Set the `--vh` custom property, in px.
    SetViewportUnit(f64),

    // --- Timers ---
    /// Run `task` after `delay_ms`, replacing a pending run of the same task.
    Schedule { task: Task, delay_ms: u32 },
    /// Discard a pending run of `task`.
    Cancel(Task),
}
