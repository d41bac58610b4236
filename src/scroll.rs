//! Scroll geometry: anchor targets, back-to-top visibility, active section.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

use crate::consts::{ACTIVE_SECTION_OFFSET_PX, BACK_TO_TOP_THRESHOLD_PX};

/// Measured box of one page section, in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRect {
    /// The section's `id`, if it has one.
    pub id: Option<String>,
    /// `offsetTop`.
    pub top: f64,
    /// `clientHeight`.
    pub height: f64,
}

impl SectionRect {
    #[must_use]
    pub fn new(id: Option<&str>, top: f64, height: f64) -> Self {
        Self { id: id.map(str::to_owned), top, height }
    }

    /// Half-open containment: `[top, top + height)`.
    #[must_use]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Fragment identifier of a same-page link, without the `#`.
///
/// A bare `#` and non-fragment hrefs yield `None`.
#[must_use]
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Document offset of an element from its viewport-relative top.
///
/// Works for any element (SVG included), unlike `offsetTop`.
#[must_use]
pub fn document_top(viewport_top: f64, scroll_y: f64) -> f64 {
    viewport_top + scroll_y
}

/// Scroll offset that puts a target just below the fixed navbar.
#[must_use]
pub fn anchor_offset(element_top: f64, navbar_height: f64) -> f64 {
    element_top - navbar_height
}

/// Whether the back-to-top control shows at this scroll offset.
#[must_use]
pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_THRESHOLD_PX
}

/// Id of the section under the marker line at `scroll_y + 100`.
///
/// Sections are scanned in document order and the last match wins, so when
/// ranges overlap the later section is chosen. Sections without an id can
/// still win, which clears the highlight like an empty id would.
#[must_use]
pub fn active_section(sections: &[SectionRect], scroll_y: f64) -> Option<&str> {
    let marker = scroll_y + ACTIVE_SECTION_OFFSET_PX;
    let mut current = None;
    for section in sections {
        if section.contains(marker) {
            current = Some(section.id.as_deref());
        }
    }
    current.flatten()
}

/// Nav href that should carry the active class for `section_id`.
#[must_use]
pub fn nav_href(section_id: &str) -> String {
    format!("#{section_id}")
}
