//! Light/dark theme resolution.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::str::FromStr;

use serde::Deserialize;

/// The two supported color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// The string persisted in storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(()),
        }
    }
}

/// Theme used when nothing is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeDefault {
    /// Follow `prefers-color-scheme`.
    #[default]
    Ambient,
    Dark,
    Light,
}

/// Pick the theme for a fresh page view.
///
/// A recognized stored value wins. Anything else falls through to `default`.
#[must_use]
pub fn resolve(stored: Option<&str>, prefers_dark: bool, default: ThemeDefault) -> Theme {
    if let Some(Ok(theme)) = stored.map(str::parse::<Theme>) {
        return theme;
    }
    match default {
        ThemeDefault::Ambient if prefers_dark => Theme::Dark,
        ThemeDefault::Ambient | ThemeDefault::Light => Theme::Light,
        ThemeDefault::Dark => Theme::Dark,
    }
}
