//! Scroll position accounting: nav state, active section, anchor targets and
//! page progress. Pure functions over numbers the DOM layer reads.

/// Vertical extent of a `section[id]` as laid out on the page.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self { id: id.into(), top, height }
    }

    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

pub fn nav_is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y >= threshold
}

/// Index of the section containing `scroll_y + lookahead`, if any.
/// Sections are laid out contiguously so at most one can match; the first wins.
pub fn active_section(sections: &[SectionSpan], scroll_y: f64, lookahead: f64) -> Option<usize> {
    let mark = scroll_y + lookahead;
    sections.iter().position(|s| s.contains(mark))
}

/// Whether a nav link's `href` points at the section with `id`.
pub fn link_targets(href: &str, id: &str) -> bool {
    href.strip_prefix('#') == Some(id)
}

/// Per-link active flags for the given active section (all false when none).
pub fn active_link_flags(hrefs: &[String], active_id: Option<&str>) -> Vec<bool> {
    hrefs
        .iter()
        .map(|h| active_id.is_some_and(|id| link_targets(h, id)))
        .collect()
}

/// Fragment id an in-page anchor points at. A bare `#` has no target.
pub fn anchor_fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Document offset to scroll to so the target sits just below the fixed nav.
pub fn smooth_scroll_top(target_rect_top: f64, scroll_y: f64, nav_height: f64) -> f64 {
    target_rect_top + scroll_y - nav_height
}

/// Fraction of the scrollable page already scrolled, in `[0, 1]`.
pub fn scroll_progress(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}
