//! Applies core [`Effect`]s to the live document.
//!
//! Every mutation is best-effort: a failed browser call is logged at debug
//! level and the remaining effects still run. Effects that target markup the
//! page does not have are skipped.

use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Clipboard, Element, Event, HtmlButtonElement, HtmlElement, ScrollBehavior, ScrollToOptions};

use super::page::Page;
use crate::effect::Effect;
use crate::email::{COPIED_COLOR, COPIED_LABEL};
use crate::error::PageError;
use crate::form::SENDING_LABEL_HTML;
use crate::menu::MenuState;
use crate::scroll::nav_href;
use crate::theme::Theme;

/// Log a failed browser call without interrupting the caller.
fn check(what: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::debug!("{what} failed: {err:?}");
    }
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    check(property, el.style().set_property(property, value));
}

fn clear_style(el: &HtmlElement, property: &str) {
    if let Err(err) = el.style().remove_property(property) {
        log::debug!("clear {property} failed: {err:?}");
    }
}

fn set_class(el: &Element, class: &str, on: bool) {
    if let Err(err) = el.class_list().toggle_with_force(class, on) {
        log::debug!("class {class} failed: {err:?}");
    }
}

impl Page {
    pub(super) fn apply(self: &Rc<Self>, event: Option<&Event>, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::PreventDefault => {
                    if let Some(event) = event {
                        event.prevent_default();
                    }
                }
                Effect::StopPropagation => {
                    if let Some(event) = event {
                        event.stop_propagation();
                    }
                }
                Effect::SetMenuLayout { mobile, panel_visible } => self.set_menu_layout(mobile, panel_visible),
                Effect::ShowMenuPanel => self.set_panel_display(true),
                Effect::HideMenuPanel => self.set_panel_display(false),
                Effect::SetMenuState(state) => self.set_menu_state(state),
                Effect::ApplyTheme(theme) => self.apply_theme(theme),
                Effect::PersistTheme(theme) => self.persist_theme(theme),
                Effect::ScrollTo { top } => self.scroll_to(top),
                Effect::ReplaceFragment(fragment) => self.replace_fragment(&fragment),
                Effect::SetBackToTopVisible(visible) => {
                    if let Some(button) = &self.elements.back_to_top {
                        set_class(button, "visible", visible);
                    }
                }
                Effect::SetActiveNav(id) => self.set_active_nav(id.as_deref()),
                Effect::RevealSection(index) => {
                    if let Some(section) = self.elements.sections.get(index) {
                        set_class(section, &self.config.reveal_class, true);
                    }
                }
                Effect::CollapseSkillBars => self.collapse_skill_bars(),
                Effect::RestoreSkillBars => self.restore_skill_bars(),
                Effect::MarkFields(validity) => self.mark_fields(&validity),
                Effect::Alert(message) => check("alert", self.window.alert_with_message(&message)),
                Effect::SetSubmitBusy(busy) => self.set_submit_busy(busy),
                Effect::ResetForm => {
                    if let Some(form) = &self.elements.contact_form {
                        form.reset();
                    }
                }
                Effect::CopyToClipboard { link, address } => self.copy_to_clipboard(link, address),
                Effect::ShowCopied { link } => self.show_copied(link),
                Effect::RestoreLinkLabel { link } => self.restore_link_label(link),
                Effect::SetFooterYear(year) => {
                    if let Some(el) = &self.elements.current_year {
                        el.set_text_content(Some(&year.to_string()));
                    }
                }
                Effect::SetViewportUnit(vh) => {
                    if let Some(root) = &self.elements.root {
                        set_style(root, "--vh", &format!("{vh}px"));
                    }
                }
                Effect::Schedule { task, delay_ms } => self.schedule(task, delay_ms),
                Effect::Cancel(task) => self.cancel(task),
            }
        }
    }

    // --- Menu ---

    fn set_menu_layout(&self, mobile: bool, panel_visible: bool) {
        if let Some(toggle) = &self.elements.menu_toggle {
            set_style(toggle, "display", if mobile { "flex" } else { "none" });
        }
        self.set_panel_display(panel_visible);
    }

    fn set_panel_display(&self, visible: bool) {
        if let Some(panel) = &self.elements.nav_links {
            set_style(panel, "display", if visible { "flex" } else { "none" });
        }
    }

    fn set_menu_state(&self, state: MenuState) {
        let open = state.is_open();
        if let Some(panel) = &self.elements.nav_links {
            set_class(panel, "active", open);
        }
        if let Some(body) = &self.elements.body {
            set_class(body, "menu-open", open);
        }
        if let Some(toggle) = &self.elements.menu_toggle {
            toggle.set_inner_html(&format!(r#"<i class="{}"></i>"#, state.icon_class()));
            set_style(toggle, "background", state.toggle_background());
        }
    }

    // --- Theme ---

    fn apply_theme(&self, theme: Theme) {
        if let Some(target) = self.theme_target() {
            set_class(target, &self.config.dark_class, theme.is_dark());
        }
    }

    fn persist_theme(&self, theme: Theme) {
        match self.window.local_storage() {
            Ok(Some(storage)) => check("theme write", storage.set_item(&self.config.theme_key, theme.as_str())),
            Ok(None) => log::debug!("no localStorage; theme not persisted"),
            Err(err) => log::debug!("localStorage unavailable: {err:?}"),
        }
    }

    // --- Scroll ---

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn replace_fragment(&self, fragment: &str) {
        match self.window.history() {
            Ok(history) => check("history", history.replace_state_with_url(&JsValue::NULL, "", Some(fragment))),
            Err(err) => log::debug!("history unavailable: {err:?}"),
        }
    }

    fn set_active_nav(&self, id: Option<&str>) {
        let wanted = id.map(nav_href);
        for item in &self.elements.nav_items {
            let active = wanted.is_some() && item.get_attribute("href") == wanted;
            set_class(item, "active", active);
        }
    }

    // --- Reveal ---

    fn collapse_skill_bars(&self) {
        let mut widths = self.skill_widths.borrow_mut();
        widths.clear();
        for bar in &self.elements.skill_bars {
            widths.push(bar.style().get_property_value("width").unwrap_or_default());
            set_style(bar, "width", "0");
        }
    }

    fn restore_skill_bars(&self) {
        let widths = self.skill_widths.borrow();
        for (bar, width) in self.elements.skill_bars.iter().zip(widths.iter()) {
            set_style(bar, "width", width);
        }
    }

    // --- Contact form ---

    fn mark_fields(&self, validity: &[bool]) {
        let fields = self.form_fields.borrow();
        for (field, ok) in fields.iter().zip(validity) {
            if *ok {
                clear_style(field, "border-color");
            } else {
                set_style(field, "border-color", "var(--danger)");
            }
        }
    }

    fn set_submit_busy(&self, busy: bool) {
        let Some(button) = &self.elements.submit_button else {
            return;
        };
        if busy {
            *self.submit_label.borrow_mut() = Some(button.inner_html());
            button.set_inner_html(SENDING_LABEL_HTML);
        } else if let Some(label) = self.submit_label.borrow_mut().take() {
            button.set_inner_html(&label);
        }
        if let Some(button) = button.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(busy);
        } else if busy {
            check("disable submit", button.set_attribute("disabled", ""));
        } else {
            check("enable submit", button.remove_attribute("disabled"));
        }
    }

    // --- Email ---

    fn copy_to_clipboard(self: &Rc<Self>, link: usize, address: String) {
        let clipboard = match clipboard(&self.window) {
            Ok(clipboard) => clipboard,
            Err(err) => {
                log::warn!("copy failed: {err}");
                return;
            }
        };
        let weak = Rc::downgrade(self);
        spawn_local(async move {
            match JsFuture::from(clipboard.write_text(&address)).await {
                Ok(_) => {
                    if let Some(page) = weak.upgrade() {
                        page.on_clipboard_written(link);
                    }
                }
                Err(err) => log::warn!("copy failed: {err:?}"),
            }
        });
    }

    fn show_copied(&self, link: usize) {
        let Some(anchor) = self.elements.email_links.get(link) else {
            return;
        };
        self.link_labels
            .borrow_mut()
            .insert(link, anchor.text_content().unwrap_or_default());
        anchor.set_text_content(Some(COPIED_LABEL));
        set_style(anchor, "color", COPIED_COLOR);
    }

    fn restore_link_label(&self, link: usize) {
        let Some(anchor) = self.elements.email_links.get(link) else {
            return;
        };
        if let Some(label) = self.link_labels.borrow_mut().remove(&link) {
            anchor.set_text_content(Some(&label));
        }
        clear_style(anchor, "color");
    }
}

/// `navigator.clipboard`, looked up dynamically so insecure contexts without
/// it report an error instead of trapping.
fn clipboard(window: &web_sys::Window) -> Result<Clipboard, PageError> {
    let value = js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;
    if value.is_undefined() || value.is_null() {
        return Err(PageError::Unsupported("navigator.clipboard"));
    }
    value
        .dyn_into::<Clipboard>()
        .map_err(|_| PageError::Unsupported("navigator.clipboard"))
}
