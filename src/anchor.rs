//! Same-page anchor resolution for smooth scrolling.

#[cfg(test)]
#[path = "anchor_test.rs"]
mod anchor_test;

/// Selector to look up for an anchor `href`, or `None` when the link should be
/// left to the browser.
#[must_use]
pub fn target_selector(href: &str) -> Option<&str> {
    if !href.starts_with('#') || href == "#" || href == "#!" {
        return None;
    }
    Some(href)
}

/// Scroll offset that puts the target `offset_px` below the viewport top.
#[must_use]
pub fn scroll_top_for(target_top: f64, offset_px: f64) -> f64 {
    target_top - offset_px
}
