//! Browser host: binds [`crate::site::SiteCore`] to the live document.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything that touches `web-sys` lives under this module. The core above
//! it stays browser-free so it can be tested natively; this layer only looks
//! up markup, measures layout, forwards events, and applies effects.

mod apply;
pub mod listener;
mod page;
pub mod query;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub use page::Page;

use crate::config::{CONFIG_META_NAME, Config};
use crate::error::PageError;

thread_local! {
    static CURRENT: RefCell<Option<Rc<Page>>> = const { RefCell::new(None) };
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Config embedded in the page, or defaults when there is none.
///
/// # Errors
///
/// Returns [`PageError::Config`] for a malformed config. Nothing is logged
/// here: this runs before the logger is installed, so the caller reports it.
pub fn read_config() -> Result<Config, PageError> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Ok(Config::default());
    };
    let selector = format!(r#"meta[name="{CONFIG_META_NAME}"]"#);
    match query::first::<web_sys::Element>(&document, &selector).and_then(|meta| meta.get_attribute("content")) {
        Some(raw) => Config::from_json(&raw),
        None => Ok(Config::default()),
    }
}

/// Mount now if the document is parsed, otherwise on `DOMContentLoaded`.
///
/// # Errors
///
/// Returns [`PageError::Unsupported`] outside a browser document.
pub fn mount_when_ready(config: Config) -> Result<(), PageError> {
    let window = web_sys::window().ok_or(PageError::Unsupported("window"))?;
    let document = window.document().ok_or(PageError::Unsupported("document"))?;
    let state = js_sys::Reflect::get(&document, &JsValue::from_str("readyState"))?;
    if state.as_string().as_deref() == Some("loading") {
        let callback = Closure::once_into_js(move || {
            if let Err(err) = mount(config) {
                log::warn!("mount failed: {err}");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
        Ok(())
    } else {
        mount(config)
    }
}

/// Replace the current page view with a fresh one.
fn mount(config: Config) -> Result<(), PageError> {
    teardown();
    let page = Page::mount(config)?;
    CURRENT.with(|current| *current.borrow_mut() = Some(page));
    Ok(())
}

/// Tear down the current page view, if any.
pub fn teardown() {
    if let Some(page) = CURRENT.with(|current| current.borrow_mut().take()) {
        page.teardown();
    }
}
