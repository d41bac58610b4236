//! The per-page-view controller.
//!
//! `SiteCore` holds every piece of transient UI state for one page view and
//! turns host events into [`Effect`]s. It has no browser dependency, so the
//! whole page behavior can be driven from tests with a virtual clock; the
//! browser host in [`crate::dom`] only measures, forwards, and applies.

#[cfg(test)]
#[path = "site_test.rs"]
mod site_test;

use crate::config::Config;
use crate::consts::{COPY_REVERT_MS, MENU_HIDE_DELAY_MS, MENU_OPEN_FRAME_MS, SKILL_BAR_DELAY_MS, SUBMIT_DELAY_MS};
use crate::effect::Effect;
use crate::email::{ClickModifiers, CopyLabels, mailto_address};
use crate::form::{ContactForm, FieldInput, MISSING_FIELDS_MESSAGE, SUCCESS_MESSAGE, SubmitAttempt};
use crate::menu::{Menu, MenuState, MenuTrigger, is_mobile};
use crate::reveal::RevealTracker;
use crate::scheduler::Task;
use crate::scroll::{SectionRect, active_section, anchor_offset, back_to_top_visible, nav_href};
use crate::theme::{self, Theme, ThemeDefault};
use crate::touch::{DoubleTapGuard, TouchOrigin, is_horizontal_drag, is_overscroll, is_pinch, viewport_unit};

/// Inner size of the browser window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Controller state for one page view.
pub struct SiteCore {
    theme_default: ThemeDefault,
    update_url_fragment: bool,
    navbar_fallback_height: f64,

    viewport: Viewport,
    mobile_layout: Option<bool>,
    menu: Menu,
    theme: Theme,
    back_to_top: Option<bool>,
    active_nav: Option<Option<String>>,
    reveal: RevealTracker,
    form: ContactForm,
    copy_labels: CopyLabels,
    double_tap: DoubleTapGuard,
    touch_origin: TouchOrigin,
}

impl SiteCore {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            theme_default: config.theme_default,
            update_url_fragment: config.update_url_fragment,
            navbar_fallback_height: config.navbar_fallback_height,
            viewport: Viewport::new(0.0, 0.0),
            mobile_layout: None,
            menu: Menu::new(),
            theme: Theme::Light,
            back_to_top: None,
            active_nav: None,
            reveal: RevealTracker::new(config.skills_section_id.clone()),
            form: ContactForm::new(),
            copy_labels: CopyLabels::new(),
            double_tap: DoubleTapGuard::new(),
            touch_origin: TouchOrigin::default(),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn menu_state(&self) -> MenuState {
        self.menu.state()
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    // --- Load ---

    /// Initial layout, `--vh`, and footer year.
    pub fn load(&mut self, viewport: Viewport, year: u32) -> Vec<Effect> {
        let mut effects = self.on_resize(viewport);
        effects.push(Effect::SetFooterYear(year));
        effects
    }

    /// Resolve and apply the theme for this page view.
    pub fn init_theme(&mut self, stored: Option<&str>, prefers_dark: bool) -> Vec<Effect> {
        self.theme = theme::resolve(stored, prefers_dark, self.theme_default);
        vec![Effect::ApplyTheme(self.theme)]
    }

    // --- Menu ---

    pub fn on_menu_toggle(&mut self) -> Vec<Effect> {
        let mut effects = vec![Effect::PreventDefault, Effect::StopPropagation];
        effects.extend(self.drive_menu(MenuTrigger::Toggle));
        effects
    }

    /// A click anywhere in the document; the flags say where it landed.
    pub fn on_document_click(&mut self, inside_panel: bool, inside_toggle: bool) -> Vec<Effect> {
        if inside_panel || inside_toggle {
            return Vec::new();
        }
        self.drive_menu(MenuTrigger::OutsideClick)
    }

    pub fn on_nav_link_click(&mut self) -> Vec<Effect> {
        self.drive_menu(MenuTrigger::LinkSelected)
    }

    pub fn on_resize(&mut self, viewport: Viewport) -> Vec<Effect> {
        self.viewport = viewport;
        let mut effects = self.drive_menu(MenuTrigger::Resize);

        let mobile = is_mobile(viewport.width);
        if self.mobile_layout != Some(mobile) {
            self.mobile_layout = Some(mobile);
            effects.push(Effect::SetMenuLayout { mobile, panel_visible: !mobile || self.menu.state().is_open() });
        }
        effects.push(Effect::SetViewportUnit(viewport_unit(viewport.height)));
        effects
    }

    fn drive_menu(&mut self, trigger: MenuTrigger) -> Vec<Effect> {
        match self.menu.transition(trigger, self.viewport.width) {
            Some(MenuState::Open) => vec![
                Effect::Cancel(Task::MenuHide),
                Effect::ShowMenuPanel,
                Effect::Schedule { task: Task::MenuOpenFrame, delay_ms: MENU_OPEN_FRAME_MS },
            ],
            Some(MenuState::Closed) => vec![
                Effect::Cancel(Task::MenuOpenFrame),
                Effect::SetMenuState(MenuState::Closed),
                Effect::Schedule { task: Task::MenuHide, delay_ms: MENU_HIDE_DELAY_MS },
            ],
            None => Vec::new(),
        }
    }

    // --- Theme ---

    pub fn on_theme_toggle(&mut self) -> Vec<Effect> {
        self.theme = self.theme.toggled();
        vec![Effect::ApplyTheme(self.theme), Effect::PersistTheme(self.theme)]
    }

    // --- Scroll ---

    /// Activation of a same-page link to `#target_id`.
    ///
    /// `target_top` is `None` when no element has that id; the browser then
    /// handles the click normally. `navbar_height` is `None` when the navbar
    /// could not be measured.
    pub fn on_anchor_click(&mut self, target_id: &str, target_top: Option<f64>, navbar_height: Option<f64>) -> Vec<Effect> {
        let Some(top) = target_top else {
            return Vec::new();
        };
        let mut effects = vec![Effect::PreventDefault];
        effects.extend(self.drive_menu(MenuTrigger::AnchorNavigation));
        let navbar = navbar_height.unwrap_or(self.navbar_fallback_height);
        effects.push(Effect::ScrollTo { top: anchor_offset(top, navbar) });
        if self.update_url_fragment {
            effects.push(Effect::ReplaceFragment(nav_href(target_id)));
        }
        effects
    }

    pub fn on_back_to_top(&mut self) -> Vec<Effect> {
        vec![Effect::PreventDefault, Effect::ScrollTo { top: 0.0 }]
    }

    /// Scroll position changed; sections are measured in document order.
    pub fn on_scroll(&mut self, scroll_y: f64, sections: &[SectionRect]) -> Vec<Effect> {
        let mut effects = Vec::new();

        let visible = back_to_top_visible(scroll_y);
        if self.back_to_top != Some(visible) {
            self.back_to_top = Some(visible);
            effects.push(Effect::SetBackToTopVisible(visible));
        }

        let current = active_section(sections, scroll_y).map(str::to_owned);
        if self.active_nav.as_ref() != Some(&current) {
            self.active_nav = Some(current.clone());
            effects.push(Effect::SetActiveNav(current));
        }
        effects
    }

    // --- Reveal ---

    /// The section at `index` reported as intersecting the viewport.
    pub fn on_section_visible(&mut self, index: usize, id: Option<&str>) -> Vec<Effect> {
        let outcome = self.reveal.on_intersecting(index, id);
        let mut effects = Vec::new();
        if outcome.reveal {
            effects.push(Effect::RevealSection(index));
        }
        if outcome.animate_skills {
            effects.push(Effect::CollapseSkillBars);
            effects.push(Effect::Schedule { task: Task::SkillBarsRestore, delay_ms: SKILL_BAR_DELAY_MS });
        }
        effects
    }

    // --- Contact form ---

    pub fn on_form_submit(&mut self, fields: &[FieldInput]) -> Vec<Effect> {
        let mut effects = vec![Effect::PreventDefault];
        match self.form.submit(fields) {
            SubmitAttempt::Busy => {}
            SubmitAttempt::Rejected(validity) => {
                effects.push(Effect::MarkFields(validity));
                effects.push(Effect::Alert(MISSING_FIELDS_MESSAGE.to_owned()));
            }
            SubmitAttempt::Accepted(validity) => {
                effects.push(Effect::MarkFields(validity));
                effects.push(Effect::SetSubmitBusy(true));
                effects.push(Effect::Schedule { task: Task::SubmitComplete, delay_ms: SUBMIT_DELAY_MS });
            }
        }
        effects
    }

    // --- Email ---

    /// Click on the email link at `link`.
    pub fn on_email_click(&mut self, link: usize, href: &str, modifiers: ClickModifiers) -> Vec<Effect> {
        if modifiers.wants_default() {
            return Vec::new();
        }
        let Some(address) = mailto_address(href) else {
            return Vec::new();
        };
        vec![Effect::PreventDefault, Effect::CopyToClipboard { link, address: address.to_owned() }]
    }

    /// The clipboard accepted the address for `link`.
    pub fn on_clipboard_written(&mut self, link: usize) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.copy_labels.show(link) {
            effects.push(Effect::ShowCopied { link });
        }
        effects.push(Effect::Schedule { task: Task::CopyRevert(link), delay_ms: COPY_REVERT_MS });
        effects
    }

    // --- Touch ---

    pub fn on_touch_start(&mut self, x: f64, y: f64, touches: u32) -> Vec<Effect> {
        self.touch_origin = TouchOrigin { x, y };
        self.menu.touch_started(y);
        if is_pinch(touches) { vec![Effect::PreventDefault] } else { Vec::new() }
    }

    pub fn on_touch_move(&mut self, x: f64, y: f64) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.menu.is_closing_swipe(y) {
            effects.extend(self.drive_menu(MenuTrigger::Swipe));
        }
        if is_horizontal_drag(x - self.touch_origin.x, y - self.touch_origin.y) {
            effects.push(Effect::PreventDefault);
        }
        effects
    }

    pub fn on_touch_end(&mut self, now_ms: f64) -> Vec<Effect> {
        if self.double_tap.on_touch_end(now_ms) { vec![Effect::PreventDefault] } else { Vec::new() }
    }

    /// Touch move on the body, for elastic overscroll suppression.
    pub fn on_body_touch_move(&mut self, scroll_height: f64) -> Vec<Effect> {
        if is_overscroll(scroll_height, self.viewport.height) { vec![Effect::PreventDefault] } else { Vec::new() }
    }

    // --- Timers ---

    /// Run a scheduled task whose delay elapsed.
    pub fn fire(&mut self, task: Task) -> Vec<Effect> {
        match task {
            Task::MenuOpenFrame if self.menu.state().is_open() => vec![Effect::SetMenuState(MenuState::Open)],
            Task::MenuHide if !self.menu.state().is_open() && is_mobile(self.viewport.width) => {
                vec![Effect::HideMenuPanel]
            }
            Task::SkillBarsRestore => vec![Effect::RestoreSkillBars],
            Task::SubmitComplete if self.form.complete() => vec![
                Effect::Alert(SUCCESS_MESSAGE.to_owned()),
                Effect::ResetForm,
                Effect::SetSubmitBusy(false),
            ],
            Task::CopyRevert(link) if self.copy_labels.revert(link) => vec![Effect::RestoreLinkLabel { link }],
            _ => Vec::new(),
        }
    }
}
