//! Client-side behavior for a static personal-portfolio page.
//!
//! This crate is compiled to WebAssembly and loaded once per page view. It
//! wires the page's cosmetic behaviors: the collapsible mobile menu, theme
//! persistence, smooth anchor scrolling, back-to-top, active-section
//! highlighting, reveal-on-scroll, the simulated contact form, email copy,
//! and mobile viewport fixes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`site`] | Per-page controller [`site::SiteCore`]; browser-free and testable |
//! | [`effect`] | DOM mutations the core asks the host to perform |
//! | [`scheduler`] | Keyed delayed tasks and a virtual-clock [`scheduler::TimerQueue`] |
//! | [`menu`] | Mobile menu state machine |
//! | [`theme`] | Light/dark resolution |
//! | [`scroll`] | Anchor offsets, back-to-top, active section |
//! | [`reveal`] | One-way reveal and the skill-bar animation guard |
//! | [`form`] | Contact form validation and submit lifecycle |
//! | [`email`] | `mailto:` copy-to-clipboard |
//! | [`touch`] | Zoom, drag, and overscroll suppression; `--vh` |
//! | [`config`] | Page configuration |
//! | [`dom`] | `web-sys` host that binds the core to the document |
//! | [`consts`] | Shared numeric constants |

pub mod config;
pub mod consts;
pub mod dom;
pub mod effect;
pub mod email;
pub mod error;
pub mod form;
pub mod menu;
pub mod reveal;
pub mod scheduler;
pub mod scroll;
pub mod site;
pub mod theme;
pub mod touch;

use wasm_bindgen::prelude::*;

use crate::config::Config;

fn init_logging(config: &Config) {
    if console_log::init_with_level(config.log_level()).is_err() {
        // Already installed by an earlier start; only the level changes.
        log::set_max_level(config.level_filter());
    }
}

/// Entry point run when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let (config, config_err) = match dom::read_config() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    init_logging(&config);
    if let Some(err) = config_err {
        log::warn!("{err}; using defaults");
    }
    if let Err(err) = dom::mount_when_ready(config) {
        log::warn!("page not mounted: {err}");
    }
}

/// Remount the page with a JSON config from script.
///
/// # Errors
///
/// Rejects malformed JSON or a missing document.
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(config_json: &str) -> Result<(), JsValue> {
    let config = Config::from_json(config_json).map_err(|err| JsValue::from_str(&err.to_string()))?;
    init_logging(&config);
    dom::mount_when_ready(config).map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Detach every handler and cancel every pending timer.
#[wasm_bindgen]
pub fn teardown() {
    dom::teardown();
}
