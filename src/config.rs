//! Page configuration.
//!
//! Every field has a default matching the stock portfolio markup, so a page
//! without configuration gets the stock behavior. Pages can
//! override any subset with camelCase JSON, either in
//! `<meta name="folio-config" content="...">` or through
//! [`crate::start_with_config`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::NAVBAR_FALLBACK_HEIGHT_PX;
use crate::error::PageError;
use crate::theme::ThemeDefault;

/// `name` of the meta tag carrying the JSON config.
pub const CONFIG_META_NAME: &str = "folio-config";

/// Element that carries the dark class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeTarget {
    #[default]
    Body,
    /// `<html>`.
    Root,
}

/// Element ids, selectors, class names, and behavior switches.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub menu_toggle_id: String,
    pub nav_links_id: String,
    pub theme_toggle_id: String,
    pub contact_form_id: String,
    pub current_year_id: String,
    pub skills_section_id: String,

    pub navbar_selector: String,
    pub back_to_top_selector: String,
    pub section_selector: String,
    pub nav_item_selector: String,
    pub skill_bar_selector: String,
    pub submit_selector: String,

    pub theme_key: String,
    pub dark_class: String,
    pub theme_target: ThemeTarget,
    pub theme_default: ThemeDefault,

    pub reveal_class: String,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,

    pub update_url_fragment: bool,
    pub navbar_fallback_height: f64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            menu_toggle_id: "menuToggle".into(),
            nav_links_id: "navLinks".into(),
            theme_toggle_id: "themeToggle".into(),
            contact_form_id: "contactForm".into(),
            current_year_id: "currentYear".into(),
            skills_section_id: "skills".into(),
            navbar_selector: ".navbar".into(),
            back_to_top_selector: ".back-to-top".into(),
            section_selector: "section".into(),
            nav_item_selector: ".nav-links a".into(),
            skill_bar_selector: ".skill-level".into(),
            submit_selector: ".btn-submit".into(),
            theme_key: "theme".into(),
            dark_class: "dark-mode".into(),
            theme_target: ThemeTarget::Body,
            theme_default: ThemeDefault::Ambient,
            reveal_class: "revealed".into(),
            reveal_threshold: 0.2,
            reveal_root_margin: "0px 0px -50px 0px".into(),
            update_url_fragment: false,
            navbar_fallback_height: NAVBAR_FALLBACK_HEIGHT_PX,
            log_level: "info".into(),
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON config over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Config`] when `json` is malformed or a field has
    /// the wrong type.
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.reveal_threshold = config.reveal_threshold.clamp(0.0, 1.0);
        Ok(config)
    }

    /// Configured log level, or `Info` for unknown names.
    #[must_use]
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Facade filter for [`Config::log_level`]. Applied on its own when a
    /// logger is already installed, so a later config can still change it.
    #[must_use]
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level().to_level_filter()
    }
}
