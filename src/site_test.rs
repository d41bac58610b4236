#![allow(clippy::float_cmp)]

use super::*;
use crate::scheduler::TimerQueue;

// =============================================================
// Harness: a fake page that applies effects the way the DOM host does
// =============================================================

const PHONE: Viewport = Viewport { width: 375.0, height: 800.0 };
const DESKTOP: Viewport = Viewport { width: 1280.0, height: 900.0 };

#[derive(Default)]
struct FakePage {
    menu_open: bool,
    panel_displayed: bool,
    mobile_layout: Option<bool>,
    dark: Option<bool>,
    stored_theme: Option<String>,
    scrolls: Vec<f64>,
    fragment: Option<String>,
    back_to_top: bool,
    active_nav: Option<String>,
    revealed: Vec<usize>,
    skill_widths: Vec<String>,
    captured_widths: Vec<String>,
    fields: Vec<FieldInput>,
    field_ok: Vec<bool>,
    alerts: Vec<String>,
    submit_busy: bool,
    labels: Vec<String>,
    original_labels: Vec<Option<String>>,
    clipboard: Vec<String>,
    footer_year: Option<u32>,
    vh: Option<f64>,
    prevented: bool,
}

struct Harness {
    core: SiteCore,
    clock: TimerQueue,
    page: FakePage,
}

impl Harness {
    fn new(config: &Config, viewport: Viewport) -> Self {
        let mut h = Self { core: SiteCore::new(config), clock: TimerQueue::new(), page: FakePage::default() };
        h.page.labels = vec!["me@example.com".into(), "work@example.com".into()];
        h.page.original_labels = vec![None, None];
        h.page.skill_widths = vec!["90%".into(), "75%".into()];
        let effects = h.core.load(viewport, 2026);
        h.apply(effects);
        h
    }

    fn phone() -> Self {
        Self::new(&Config::default(), PHONE)
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        self.page.prevented = false;
        for effect in effects {
            match effect {
                Effect::PreventDefault => self.page.prevented = true,
                Effect::StopPropagation => {}
                Effect::SetMenuLayout { mobile, panel_visible } => {
                    self.page.mobile_layout = Some(mobile);
                    self.page.panel_displayed = panel_visible;
                }
                Effect::ShowMenuPanel => self.page.panel_displayed = true,
                Effect::HideMenuPanel => self.page.panel_displayed = false,
                Effect::SetMenuState(state) => self.page.menu_open = state.is_open(),
                Effect::ApplyTheme(theme) => self.page.dark = Some(theme.is_dark()),
                Effect::PersistTheme(theme) => self.page.stored_theme = Some(theme.as_str().to_owned()),
                Effect::ScrollTo { top } => self.page.scrolls.push(top),
                Effect::ReplaceFragment(fragment) => self.page.fragment = Some(fragment),
                Effect::SetBackToTopVisible(visible) => self.page.back_to_top = visible,
                Effect::SetActiveNav(id) => self.page.active_nav = id,
                Effect::RevealSection(index) => self.page.revealed.push(index),
                Effect::CollapseSkillBars => {
                    self.page.captured_widths = self.page.skill_widths.clone();
                    for width in &mut self.page.skill_widths {
                        *width = "0".into();
                    }
                }
                Effect::RestoreSkillBars => self.page.skill_widths = self.page.captured_widths.clone(),
                Effect::MarkFields(ok) => self.page.field_ok = ok,
                Effect::Alert(message) => self.page.alerts.push(message),
                Effect::SetSubmitBusy(busy) => self.page.submit_busy = busy,
                Effect::ResetForm => {
                    for field in &mut self.page.fields {
                        field.value.clear();
                    }
                }
                Effect::CopyToClipboard { address, .. } => self.page.clipboard.push(address),
                Effect::ShowCopied { link } => {
                    self.page.original_labels[link] = Some(self.page.labels[link].clone());
                    self.page.labels[link] = crate::email::COPIED_LABEL.into();
                }
                Effect::RestoreLinkLabel { link } => {
                    if let Some(original) = self.page.original_labels[link].take() {
                        self.page.labels[link] = original;
                    }
                }
                Effect::SetFooterYear(year) => self.page.footer_year = Some(year),
                Effect::SetViewportUnit(vh) => self.page.vh = Some(vh),
                Effect::Schedule { task, delay_ms } => self.clock.schedule(task, delay_ms),
                Effect::Cancel(task) => {
                    self.clock.cancel(task);
                }
            }
        }
    }

    fn advance(&mut self, ms: u64) {
        let until = self.clock.now_ms() + ms;
        while let Some(task) = self.clock.pop_due(until) {
            let effects = self.core.fire(task);
            self.apply(effects);
        }
    }

    fn toggle_menu(&mut self) {
        let effects = self.core.on_menu_toggle();
        self.apply(effects);
        self.advance(10);
    }

    fn submit(&mut self) {
        let fields = self.page.fields.clone();
        let effects = self.core.on_form_submit(&fields);
        self.apply(effects);
    }
}

fn sections() -> Vec<SectionRect> {
    vec![
        SectionRect::new(Some("home"), 0.0, 200.0),
        SectionRect::new(Some("about"), 200.0, 200.0),
        SectionRect::new(Some("skills"), 400.0, 600.0),
    ]
}

// =============================================================
// Load
// =============================================================

#[test]
fn load_sets_layout_vh_and_year() {
    let h = Harness::phone();
    assert_eq!(h.page.mobile_layout, Some(true));
    assert!(!h.page.panel_displayed);
    assert_eq!(h.page.vh, Some(8.0));
    assert_eq!(h.page.footer_year, Some(2026));
}

#[test]
fn desktop_load_shows_panel() {
    let h = Harness::new(&Config::default(), DESKTOP);
    assert_eq!(h.page.mobile_layout, Some(false));
    assert!(h.page.panel_displayed);
}

// =============================================================
// Menu
// =============================================================

#[test]
fn toggle_opens_after_frame_delay() {
    let mut h = Harness::phone();
    let effects = h.core.on_menu_toggle();
    h.apply(effects);
    assert!(h.page.panel_displayed);
    assert!(!h.page.menu_open);
    h.advance(10);
    assert!(h.page.menu_open);
    assert_eq!(h.core.menu_state(), MenuState::Open);
}

#[test]
fn toggle_close_hides_panel_after_transition() {
    let mut h = Harness::phone();
    h.toggle_menu();
    h.toggle_menu();
    assert!(!h.page.menu_open);
    assert!(h.page.panel_displayed);
    h.advance(300);
    assert!(!h.page.panel_displayed);
}

#[test]
fn reopening_during_close_transition_keeps_panel() {
    let mut h = Harness::phone();
    h.toggle_menu();
    h.toggle_menu();
    h.advance(100);
    h.toggle_menu();
    h.advance(500);
    assert!(h.page.menu_open);
    assert!(h.page.panel_displayed);
}

#[test]
fn menu_never_opens_above_breakpoint() {
    let mut h = Harness::new(&Config::default(), DESKTOP);
    h.toggle_menu();
    assert!(!h.page.menu_open);
    assert_eq!(h.core.menu_state(), MenuState::Closed);
}

#[test]
fn resize_above_breakpoint_closes_and_keeps_desktop_nav() {
    let mut h = Harness::phone();
    h.toggle_menu();
    let effects = h.core.on_resize(DESKTOP);
    h.apply(effects);
    assert!(!h.page.menu_open);
    assert_eq!(h.page.mobile_layout, Some(false));
    h.advance(1000);
    assert!(h.page.panel_displayed);
}

#[test]
fn outside_click_closes_but_inside_click_does_not() {
    let mut h = Harness::phone();
    h.toggle_menu();
    let effects = h.core.on_document_click(true, false);
    h.apply(effects);
    assert!(h.page.menu_open);
    let effects = h.core.on_document_click(false, false);
    h.apply(effects);
    assert!(!h.page.menu_open);
}

#[test]
fn nav_link_click_closes() {
    let mut h = Harness::phone();
    h.toggle_menu();
    let effects = h.core.on_nav_link_click();
    h.apply(effects);
    assert_eq!(h.core.menu_state(), MenuState::Closed);
}

#[test]
fn downward_swipe_closes() {
    let mut h = Harness::phone();
    h.toggle_menu();
    let effects = h.core.on_touch_start(100.0, 100.0, 1);
    h.apply(effects);
    let effects = h.core.on_touch_move(100.0, 140.0);
    h.apply(effects);
    assert!(h.page.menu_open);
    let effects = h.core.on_touch_move(100.0, 151.0);
    h.apply(effects);
    assert!(!h.page.menu_open);
    assert!(!h.page.prevented);
}

// =============================================================
// Theme
// =============================================================

#[test]
fn toggle_twice_restores_persisted_value() {
    let mut h = Harness::phone();
    let effects = h.core.init_theme(Some("dark"), false);
    h.apply(effects);
    let effects = h.core.on_theme_toggle();
    h.apply(effects);
    assert_eq!(h.page.stored_theme.as_deref(), Some("light"));
    let effects = h.core.on_theme_toggle();
    h.apply(effects);
    assert_eq!(h.page.stored_theme.as_deref(), Some("dark"));
    assert_eq!(h.page.dark, Some(true));
}

#[test]
fn init_applies_without_persisting() {
    let mut h = Harness::phone();
    let effects = h.core.init_theme(None, true);
    h.apply(effects);
    assert_eq!(h.page.dark, Some(true));
    assert!(h.page.stored_theme.is_none());
}

#[test]
fn configured_default_overrides_ambient() {
    let config = Config { theme_default: ThemeDefault::Dark, ..Config::default() };
    let mut h = Harness::new(&config, PHONE);
    let effects = h.core.init_theme(None, false);
    h.apply(effects);
    assert_eq!(h.core.theme(), Theme::Dark);
}

// =============================================================
// Scroll
// =============================================================

#[test]
fn anchor_click_scrolls_below_navbar_and_closes_menu() {
    let mut h = Harness::phone();
    h.toggle_menu();
    let effects = h.core.on_anchor_click("about", Some(600.0), Some(64.0));
    h.apply(effects);
    assert!(h.page.prevented);
    assert_eq!(h.page.scrolls, vec![536.0]);
    assert!(!h.page.menu_open);
    assert!(h.page.fragment.is_none());
}

#[test]
fn anchor_click_uses_fallback_navbar_height() {
    let mut h = Harness::phone();
    let effects = h.core.on_anchor_click("about", Some(600.0), None);
    h.apply(effects);
    assert_eq!(h.page.scrolls, vec![530.0]);
}

#[test]
fn anchor_to_missing_element_is_left_to_browser() {
    let mut h = Harness::phone();
    assert!(h.core.on_anchor_click("nowhere", None, Some(64.0)).is_empty());
}

#[test]
fn anchor_click_can_update_fragment() {
    let config = Config { update_url_fragment: true, ..Config::default() };
    let mut h = Harness::new(&config, DESKTOP);
    let effects = h.core.on_anchor_click("skills", Some(900.0), Some(70.0));
    h.apply(effects);
    assert_eq!(h.page.fragment.as_deref(), Some("#skills"));
}

#[test]
fn back_to_top_toggles_at_300_both_ways() {
    let mut h = Harness::phone();
    for (y, expected) in [(0.0, false), (300.0, false), (301.0, true), (300.0, false), (1200.0, true), (10.0, false)] {
        let effects = h.core.on_scroll(y, &[]);
        h.apply(effects);
        assert_eq!(h.page.back_to_top, expected, "scroll_y = {y}");
    }
}

#[test]
fn back_to_top_scrolls_home() {
    let mut h = Harness::phone();
    let effects = h.core.on_back_to_top();
    h.apply(effects);
    assert_eq!(h.page.scrolls, vec![0.0]);
}

#[test]
fn scroll_emits_only_on_change() {
    let mut h = Harness::phone();
    assert_eq!(
        h.core.on_scroll(0.0, &sections()),
        vec![Effect::SetBackToTopVisible(false), Effect::SetActiveNav(Some("home".into()))]
    );
    assert!(h.core.on_scroll(50.0, &sections()).is_empty());
}

#[test]
fn active_nav_follows_marker_line() {
    let mut h = Harness::phone();
    let effects = h.core.on_scroll(150.0, &sections());
    h.apply(effects);
    assert_eq!(h.page.active_nav.as_deref(), Some("about"));
    let effects = h.core.on_scroll(5000.0, &sections());
    h.apply(effects);
    assert_eq!(h.page.active_nav, None);
}

// =============================================================
// Reveal
// =============================================================

#[test]
fn skills_bars_grow_back_after_delay_once() {
    let mut h = Harness::phone();
    let effects = h.core.on_section_visible(2, Some("skills"));
    h.apply(effects);
    assert_eq!(h.page.revealed, vec![2]);
    assert_eq!(h.page.skill_widths, vec!["0", "0"]);
    h.advance(299);
    assert_eq!(h.page.skill_widths, vec!["0", "0"]);
    h.advance(1);
    assert_eq!(h.page.skill_widths, vec!["90%", "75%"]);

    assert!(h.core.on_section_visible(2, Some("skills")).is_empty());
}

#[test]
fn other_sections_reveal_without_animation() {
    let mut h = Harness::phone();
    let effects = h.core.on_section_visible(0, Some("home"));
    assert_eq!(effects, vec![Effect::RevealSection(0)]);
    h.apply(effects);
    assert!(h.clock.is_empty());
}

// =============================================================
// Contact form
// =============================================================

#[test]
fn empty_required_fields_never_succeed() {
    let mut h = Harness::phone();
    h.page.fields = vec![FieldInput::required(""), FieldInput::required("  ")];
    h.submit();
    assert!(h.page.prevented);
    assert_eq!(h.page.field_ok, vec![false, false]);
    assert_eq!(h.page.alerts, vec![MISSING_FIELDS_MESSAGE.to_owned()]);
    assert!(!h.page.submit_busy);
    h.advance(5000);
    assert_eq!(h.page.alerts.len(), 1);
}

#[test]
fn populated_form_succeeds_after_delay_and_resets() {
    let mut h = Harness::phone();
    h.page.fields = vec![FieldInput::required("Ada"), FieldInput::required("Hello"), FieldInput::optional("x")];
    h.submit();
    assert!(h.page.submit_busy);
    assert!(h.page.alerts.is_empty());
    h.advance(1499);
    assert!(h.page.alerts.is_empty());
    h.advance(1);
    assert_eq!(h.page.alerts, vec![SUCCESS_MESSAGE.to_owned()]);
    assert!(!h.page.submit_busy);
    assert!(h.page.fields.iter().all(|f| f.value.is_empty()));
}

#[test]
fn fixing_fields_clears_error_marks() {
    let mut h = Harness::phone();
    h.page.fields = vec![FieldInput::required("Ada"), FieldInput::required("")];
    h.submit();
    assert_eq!(h.page.field_ok, vec![true, false]);
    h.page.fields[1].value = "hi".into();
    h.submit();
    assert_eq!(h.page.field_ok, vec![true, true]);
}

#[test]
fn second_submit_while_sending_is_swallowed() {
    let mut h = Harness::phone();
    h.page.fields = vec![FieldInput::required("Ada")];
    h.submit();
    h.advance(500);
    h.submit();
    assert!(h.page.prevented);
    h.advance(1000);
    assert_eq!(h.page.alerts.len(), 1);
}

// =============================================================
// Email
// =============================================================

#[test]
fn mailto_click_copies_and_reverts_at_2000ms() {
    let mut h = Harness::phone();
    let effects = h.core.on_email_click(0, "mailto:me@example.com", ClickModifiers::default());
    h.apply(effects);
    assert!(h.page.prevented);
    assert_eq!(h.page.clipboard, vec!["me@example.com".to_owned()]);
    let effects = h.core.on_clipboard_written(0);
    h.apply(effects);
    assert_eq!(h.page.labels[0], "Copied!");
    h.advance(1999);
    assert_eq!(h.page.labels[0], "Copied!");
    h.advance(1);
    assert_eq!(h.page.labels[0], "me@example.com");
}

#[test]
fn modifier_click_mutates_nothing() {
    let mut h = Harness::phone();
    let effects = h.core.on_email_click(1, "mailto:work@example.com", ClickModifiers { ctrl: false, meta: true });
    assert!(effects.is_empty());
    h.apply(effects);
    assert_eq!(h.page.labels[1], "work@example.com");
    assert!(h.page.clipboard.is_empty());
}

#[test]
fn repeated_copy_keeps_original_label() {
    let mut h = Harness::phone();
    let effects = h.core.on_clipboard_written(0);
    h.apply(effects);
    h.advance(1500);
    let effects = h.core.on_clipboard_written(0);
    h.apply(effects);
    h.advance(1999);
    assert_eq!(h.page.labels[0], "Copied!");
    h.advance(1);
    assert_eq!(h.page.labels[0], "me@example.com");
}

// =============================================================
// Touch
// =============================================================

#[test]
fn pinch_and_double_tap_are_suppressed() {
    let mut h = Harness::phone();
    assert_eq!(h.core.on_touch_start(0.0, 0.0, 2), vec![Effect::PreventDefault]);
    assert!(h.core.on_touch_end(1000.0).is_empty());
    assert_eq!(h.core.on_touch_end(1200.0), vec![Effect::PreventDefault]);
}

#[test]
fn horizontal_drag_is_suppressed() {
    let mut h = Harness::phone();
    h.core.on_touch_start(100.0, 100.0, 1);
    assert_eq!(h.core.on_touch_move(160.0, 110.0), vec![Effect::PreventDefault]);
    assert!(h.core.on_touch_move(105.0, 160.0).is_empty());
}

#[test]
fn overscroll_suppressed_only_when_page_fits() {
    let mut h = Harness::phone();
    assert_eq!(h.core.on_body_touch_move(800.0), vec![Effect::PreventDefault]);
    assert!(h.core.on_body_touch_move(3000.0).is_empty());
}
