//! Copy-to-clipboard for `mailto:` links.

#[cfg(test)]
#[path = "email_test.rs"]
mod email_test;

use std::collections::HashSet;

/// Acknowledgment label shown after a successful copy.
pub const COPIED_LABEL: &str = "Copied!";

/// Label color while the acknowledgment shows.
pub const COPIED_COLOR: &str = "var(--success)";

/// Address part of a `mailto:` href, without any `?subject=...` query.
#[must_use]
pub fn mailto_address(href: &str) -> Option<&str> {
    let rest = href.strip_prefix("mailto:")?;
    let address = rest.split_once('?').map_or(rest, |(address, _)| address);
    (!address.is_empty()).then_some(address)
}

/// Modifier keys that ask for the browser's default mail handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    pub ctrl: bool,
    pub meta: bool,
}

impl ClickModifiers {
    #[must_use]
    pub fn wants_default(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Tracks which email links currently show the acknowledgment.
#[derive(Debug, Clone, Default)]
pub struct CopyLabels {
    showing: HashSet<usize>,
}

impl CopyLabels {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `link` as showing. Returns `true` when the label must be swapped,
    /// `false` when it already shows and only the revert timer restarts.
    pub fn show(&mut self, link: usize) -> bool {
        self.showing.insert(link)
    }

    /// Clear `link`. Returns whether it was showing.
    pub fn revert(&mut self, link: usize) -> bool {
        self.showing.remove(&link)
    }
}
