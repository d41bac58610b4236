//! Browser host for [`SiteCore`].
//!
//! `Page` finds the markup, installs listeners, measures layout on demand,
//! and forwards every event into the core. Each feature mounts on its own:
//! if its markup is missing or a browser call fails, that feature is logged
//! and skipped while the rest of the page keeps working.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlAnchorElement, HtmlElement, HtmlFormElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, Node, TouchEvent, Window,
};

use super::listener::{Listener, Passive};
use super::query;
use crate::config::{Config, ThemeTarget};
use crate::effect::Effect;
use crate::email::ClickModifiers;
use crate::error::PageError;
use crate::form::FieldInput;
use crate::scheduler::Task;
use crate::scroll::{SectionRect, document_top, fragment_target};
use crate::site::{SiteCore, Viewport};
use crate::touch::LOCKED_VIEWPORT;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Markup the page features bind to. Anything optional may be absent.
pub(super) struct Elements {
    pub body: Option<HtmlElement>,
    pub root: Option<HtmlElement>,
    pub menu_toggle: Option<HtmlElement>,
    pub nav_links: Option<HtmlElement>,
    pub theme_toggle: Option<HtmlElement>,
    pub navbar: Option<HtmlElement>,
    pub back_to_top: Option<HtmlElement>,
    pub sections: Vec<HtmlElement>,
    pub nav_items: Vec<Element>,
    pub skill_bars: Vec<HtmlElement>,
    pub contact_form: Option<HtmlFormElement>,
    pub submit_button: Option<HtmlElement>,
    pub email_links: Vec<HtmlAnchorElement>,
    pub current_year: Option<Element>,
}

impl Elements {
    fn find(document: &Document, config: &Config) -> Self {
        let contact_form: Option<HtmlFormElement> = query::by_id(document, &config.contact_form_id);
        let submit_button = contact_form
            .as_ref()
            .and_then(|form| query::all_within::<HtmlElement>(form, &config.submit_selector).into_iter().next());
        Self {
            body: document.body(),
            root: document.document_element().and_then(|el| el.dyn_into::<HtmlElement>().ok()),
            menu_toggle: query::by_id(document, &config.menu_toggle_id),
            nav_links: query::by_id(document, &config.nav_links_id),
            theme_toggle: query::by_id(document, &config.theme_toggle_id),
            navbar: query::first(document, &config.navbar_selector),
            back_to_top: query::first(document, &config.back_to_top_selector),
            sections: query::all(document, &config.section_selector),
            nav_items: query::all(document, &config.nav_item_selector),
            skill_bars: query::all(document, &config.skill_bar_selector),
            contact_form,
            submit_button,
            email_links: query::all(document, r#"a[href^="mailto:"]"#),
            current_year: query::by_id(document, &config.current_year_id),
        }
    }
}

/// One mounted page view.
pub struct Page {
    pub(super) config: Config,
    pub(super) window: Window,
    pub(super) document: Document,
    pub(super) elements: Elements,
    core: RefCell<SiteCore>,
    timers: RefCell<HashMap<Task, Timeout>>,
    listeners: RefCell<Vec<Listener>>,
    observer: RefCell<Option<(IntersectionObserver, ObserverCallback)>>,
    /// Required fields from the latest submit, in the order the core saw them.
    pub(super) form_fields: RefCell<Vec<HtmlElement>>,
    pub(super) skill_widths: RefCell<Vec<String>>,
    pub(super) submit_label: RefCell<Option<String>>,
    pub(super) link_labels: RefCell<HashMap<usize, String>>,
}

impl Page {
    /// Bind every feature whose markup is present.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Unsupported`] only when there is no window or
    /// document at all. Per-feature failures are logged, not returned.
    pub fn mount(config: Config) -> Result<Rc<Self>, PageError> {
        let window = web_sys::window().ok_or(PageError::Unsupported("window"))?;
        let document = window.document().ok_or(PageError::Unsupported("document"))?;
        let elements = Elements::find(&document, &config);
        let core = SiteCore::new(&config);

        let page = Rc::new(Self {
            config,
            window,
            document,
            elements,
            core: RefCell::new(core),
            timers: RefCell::new(HashMap::new()),
            listeners: RefCell::new(Vec::new()),
            observer: RefCell::new(None),
            form_fields: RefCell::new(Vec::new()),
            skill_widths: RefCell::new(Vec::new()),
            submit_label: RefCell::new(None),
            link_labels: RefCell::new(HashMap::new()),
        });

        page.lock_viewport_meta();
        page.initialize();

        let features: [(&str, fn(&Rc<Self>) -> Result<(), PageError>); 10] = [
            ("viewport", Self::bind_viewport),
            ("menu", Self::bind_menu),
            ("theme", Self::bind_theme),
            ("anchors", Self::bind_anchors),
            ("back-to-top", Self::bind_back_to_top),
            ("scroll", Self::bind_scroll),
            ("reveal", Self::bind_reveal),
            ("contact form", Self::bind_form),
            ("email links", Self::bind_email_links),
            ("touch", Self::bind_touch),
        ];
        for (name, bind) in features {
            if let Err(err) = bind(&page) {
                log::debug!("{name} not attached: {err}");
            }
        }

        log::info!("Portfolio website loaded! Mobile optimized.");
        Ok(page)
    }

    /// Detach every listener and drop every pending timer.
    pub fn teardown(&self) {
        self.listeners.borrow_mut().clear();
        self.timers.borrow_mut().clear();
        if let Some((observer, _callback)) = self.observer.borrow_mut().take() {
            observer.disconnect();
        }
    }

    // --- Dispatch ---

    /// Run a core handler and apply what it returns.
    fn dispatch(self: &Rc<Self>, event: Option<&Event>, handler: impl FnOnce(&mut SiteCore) -> Vec<Effect>) {
        let effects = {
            let mut core = self.core.borrow_mut();
            handler(&mut core)
        };
        self.apply(event, effects);
    }

    pub(super) fn schedule(self: &Rc<Self>, task: Task, delay_ms: u32) {
        let weak = Rc::downgrade(self);
        let timeout = Timeout::new(delay_ms, move || {
            if let Some(page) = weak.upgrade() {
                page.dispatch(None, |core| core.fire(task));
            }
        });
        // Replacing the entry drops (and clears) any earlier run.
        self.timers.borrow_mut().insert(task, timeout);
    }

    pub(super) fn cancel(&self, task: Task) {
        self.timers.borrow_mut().remove(&task);
    }

    pub(super) fn on_clipboard_written(self: &Rc<Self>, link: usize) {
        self.dispatch(None, |core| core.on_clipboard_written(link));
    }

    fn listen(
        self: &Rc<Self>,
        target: &EventTarget,
        kind: &'static str,
        passive: Passive,
        mut handler: impl FnMut(&Rc<Self>, Event) + 'static,
    ) -> Result<(), PageError> {
        let weak: Weak<Self> = Rc::downgrade(self);
        let listener = Listener::attach(target, kind, passive, move |event| {
            if let Some(page) = weak.upgrade() {
                handler(&page, event);
            }
        })?;
        self.listeners.borrow_mut().push(listener);
        Ok(())
    }

    // --- Measurement ---

    fn viewport(&self) -> Viewport {
        let width = self.window.inner_width().map_or(0.0, |v| v.as_f64().unwrap_or(0.0));
        let height = self.window.inner_height().map_or(0.0, |v| v.as_f64().unwrap_or(0.0));
        Viewport::new(width, height)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn section_rects(&self) -> Vec<SectionRect> {
        self.elements
            .sections
            .iter()
            .map(|section| {
                let id = section.id();
                SectionRect::new(
                    (!id.is_empty()).then_some(id.as_str()),
                    f64::from(section.offset_top()),
                    f64::from(section.client_height()),
                )
            })
            .collect()
    }

    fn navbar_height(&self) -> Option<f64> {
        self.elements.navbar.as_ref().map(|nav| f64::from(nav.offset_height()))
    }

    // --- Load ---

    fn lock_viewport_meta(&self) {
        if let Some(meta) = query::first::<Element>(&self.document, r#"meta[name="viewport"]"#) {
            if let Err(err) = meta.set_attribute("content", LOCKED_VIEWPORT) {
                log::debug!("viewport meta not updated: {err:?}");
            }
        }
    }

    fn initialize(self: &Rc<Self>) {
        let viewport = self.viewport();
        let year = js_sys::Date::new_0().get_full_year();
        self.dispatch(None, |core| core.load(viewport, year));

        let stored = self.stored_theme();
        let prefers_dark = self.prefers_dark();
        self.dispatch(None, |core| core.init_theme(stored.as_deref(), prefers_dark));

        let scroll_y = self.scroll_y();
        let sections = self.section_rects();
        self.dispatch(None, |core| core.on_scroll(scroll_y, &sections));
    }

    fn stored_theme(&self) -> Option<String> {
        match self.window.local_storage() {
            Ok(Some(storage)) => match storage.get_item(&self.config.theme_key) {
                Ok(value) => value,
                Err(err) => {
                    log::debug!("theme read failed: {err:?}");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                log::debug!("storage unavailable: {err:?}");
                None
            }
        }
    }

    fn prefers_dark(&self) -> bool {
        match self.window.match_media("(prefers-color-scheme: dark)") {
            Ok(Some(query)) => query.matches(),
            Ok(None) => false,
            Err(err) => {
                log::debug!("matchMedia failed: {err:?}");
                false
            }
        }
    }

    /// Element that carries the dark class.
    pub(super) fn theme_target(&self) -> Option<&HtmlElement> {
        match self.config.theme_target {
            ThemeTarget::Body => self.elements.body.as_ref(),
            ThemeTarget::Root => self.elements.root.as_ref(),
        }
    }

    // --- Bindings ---

    fn bind_viewport(self: &Rc<Self>) -> Result<(), PageError> {
        let window = self.window.clone();
        self.listen(&window, "resize", Passive::Default, |page, _| {
            let viewport = page.viewport();
            page.dispatch(None, |core| core.on_resize(viewport));
        })
    }

    fn bind_menu(self: &Rc<Self>) -> Result<(), PageError> {
        let toggle = self.elements.menu_toggle.clone().ok_or_else(|| PageError::missing(&self.config.menu_toggle_id))?;
        let panel = self.elements.nav_links.clone().ok_or_else(|| PageError::missing(&self.config.nav_links_id))?;

        self.listen(&toggle, "click", Passive::Default, |page, event| {
            page.dispatch(Some(&event), SiteCore::on_menu_toggle);
        })?;

        for link in query::all_within::<Element>(&panel, "a") {
            self.listen(&link, "click", Passive::Default, |page, _| {
                page.dispatch(None, SiteCore::on_nav_link_click);
            })?;
        }

        let document = self.document.clone();
        self.listen(&document, "click", Passive::Default, move |page, event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside_panel = panel.contains(target.as_ref());
            let inside_toggle = toggle.contains(target.as_ref());
            page.dispatch(None, |core| core.on_document_click(inside_panel, inside_toggle));
        })
    }

    fn bind_theme(self: &Rc<Self>) -> Result<(), PageError> {
        let toggle = self.elements.theme_toggle.clone().ok_or_else(|| PageError::missing(&self.config.theme_toggle_id))?;
        self.listen(&toggle, "click", Passive::Default, |page, _| {
            page.dispatch(None, SiteCore::on_theme_toggle);
        })
    }

    fn bind_anchors(self: &Rc<Self>) -> Result<(), PageError> {
        for anchor in query::all::<Element>(&self.document, r##"a[href^="#"]"##) {
            let link = anchor.clone();
            self.listen(&anchor, "click", Passive::Default, move |page, event| {
                let Some(href) = link.get_attribute("href") else {
                    return;
                };
                let Some(id) = fragment_target(&href) else {
                    return;
                };
                let target_top = query::by_id::<Element>(&page.document, id)
                    .map(|el| document_top(el.get_bounding_client_rect().top(), page.scroll_y()));
                let navbar_height = page.navbar_height();
                page.dispatch(Some(&event), |core| core.on_anchor_click(id, target_top, navbar_height));
            })?;
        }
        Ok(())
    }

    fn bind_back_to_top(self: &Rc<Self>) -> Result<(), PageError> {
        let button = self
            .elements
            .back_to_top
            .clone()
            .ok_or_else(|| PageError::missing(&self.config.back_to_top_selector))?;
        self.listen(&button, "click", Passive::Default, |page, event| {
            page.dispatch(Some(&event), SiteCore::on_back_to_top);
        })
    }

    fn bind_scroll(self: &Rc<Self>) -> Result<(), PageError> {
        let window = self.window.clone();
        self.listen(&window, "scroll", Passive::Yes, |page, _| {
            let scroll_y = page.scroll_y();
            let sections = page.section_rects();
            page.dispatch(None, |core| core.on_scroll(scroll_y, &sections));
        })
    }

    fn bind_reveal(self: &Rc<Self>) -> Result<(), PageError> {
        if self.elements.sections.is_empty() {
            return Err(PageError::missing(&self.config.section_selector));
        }
        let weak = Rc::downgrade(self);
        let callback: ObserverCallback = Closure::wrap(Box::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let Some(page) = weak.upgrade() else {
                return;
            };
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                let Some(index) = page
                    .elements
                    .sections
                    .iter()
                    .position(|section| AsRef::<JsValue>::as_ref(section) == AsRef::<JsValue>::as_ref(&target))
                else {
                    continue;
                };
                let id = target.id();
                page.dispatch(None, |core| core.on_section_visible(index, (!id.is_empty()).then_some(id.as_str())));
            }
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(self.config.reveal_threshold));
        init.set_root_margin(&self.config.reveal_root_margin);
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        for section in &self.elements.sections {
            observer.observe(section);
        }
        *self.observer.borrow_mut() = Some((observer, callback));
        Ok(())
    }

    fn bind_form(self: &Rc<Self>) -> Result<(), PageError> {
        let form = self
            .elements
            .contact_form
            .clone()
            .ok_or_else(|| PageError::missing(&self.config.contact_form_id))?;
        let target = form.clone();
        self.listen(&form, "submit", Passive::Default, move |page, event| {
            let fields = query::all_within::<HtmlElement>(&target, "[required]");
            let inputs: Vec<FieldInput> = fields.iter().map(|field| FieldInput::required(&field_value(field))).collect();
            *page.form_fields.borrow_mut() = fields;
            page.dispatch(Some(&event), |core| core.on_form_submit(&inputs));
        })
    }

    fn bind_email_links(self: &Rc<Self>) -> Result<(), PageError> {
        for (index, link) in self.elements.email_links.iter().enumerate() {
            let anchor = link.clone();
            self.listen(link, "click", Passive::Default, move |page, event| {
                let modifiers = event
                    .dyn_ref::<MouseEvent>()
                    .map(|mouse| ClickModifiers { ctrl: mouse.ctrl_key(), meta: mouse.meta_key() })
                    .unwrap_or_default();
                let href = anchor.href();
                page.dispatch(Some(&event), |core| core.on_email_click(index, &href, modifiers));
            })?;
        }
        Ok(())
    }

    fn bind_touch(self: &Rc<Self>) -> Result<(), PageError> {
        let root = self.elements.root.clone().ok_or_else(|| PageError::missing("html"))?;

        self.listen(&root, "touchstart", Passive::No, |page, event| {
            let Some(touch) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            let touches = touch.touches();
            let Some(first) = touches.get(0) else {
                return;
            };
            let (x, y) = (f64::from(first.client_x()), f64::from(first.client_y()));
            let count = touches.length();
            page.dispatch(Some(&event), |core| core.on_touch_start(x, y, count));
        })?;

        self.listen(&root, "touchmove", Passive::No, |page, event| {
            let Some(first) = event.dyn_ref::<TouchEvent>().and_then(|touch| touch.touches().get(0)) else {
                return;
            };
            let (x, y) = (f64::from(first.client_x()), f64::from(first.client_y()));
            page.dispatch(Some(&event), |core| core.on_touch_move(x, y));
        })?;

        self.listen(&root, "touchend", Passive::No, |page, event| {
            let now_ms = js_sys::Date::now();
            page.dispatch(Some(&event), |core| core.on_touch_end(now_ms));
        })?;

        if let Some(body) = self.elements.body.clone() {
            let measured = body.clone();
            self.listen(&body, "touchmove", Passive::No, move |page, event| {
                let scroll_height = f64::from(measured.scroll_height());
                page.dispatch(Some(&event), |core| core.on_body_touch_move(scroll_height));
            })?;
        }
        Ok(())
    }
}

/// Current value of a form control, or empty when it has none.
fn field_value(field: &HtmlElement) -> String {
    if let Some(input) = field.dyn_ref::<web_sys::HtmlInputElement>() {
        input.value()
    } else if let Some(area) = field.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = field.dyn_ref::<web_sys::HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}
