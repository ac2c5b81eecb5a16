//! Page-strip math for paginated lists.
//!
//! Computes which page numbers a pagination control should display for a
//! given current page and total page count, plus the ellipsis and
//! first/last shortcut flags derived from that range.

use serde::Serialize;

/// Default number of page buttons shown in a pagination strip.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Compute the visible page-number window for a pagination strip.
///
/// Returns consecutive page numbers, 1-based. When the total fits inside
/// `max_visible` the full `1..=total_pages` range is returned; otherwise the
/// window is anchored around `current_page` with `half = max_visible / 2`
/// pages of context, clamped so it never runs past either end. When both
/// clamps would apply, the end clamp wins.
pub fn compute_range(current_page: usize, total_pages: usize, max_visible: usize) -> Vec<usize> {
    if max_visible == 0 || total_pages == 0 {
        return Vec::new();
    }
    if total_pages <= max_visible {
        return (1..=total_pages).collect();
    }

    let half = max_visible / 2;
    let mut start = current_page.saturating_sub(half).max(1);
    if current_page <= half {
        // Near the start the window anchors at page 1.
        start = 1;
    }
    if current_page + half >= total_pages {
        // Near the end the window anchors at the last page. Evaluated after
        // the start clamp so it overrides for small totals.
        start = total_pages - max_visible + 1;
    }
    let end = (start + max_visible - 1).min(total_pages);

    (start..=end).collect()
}

/// Derived flags and page range for rendering a pagination strip.
///
/// Recomputed from scratch whenever the current page, total page count or
/// strip width changes; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Visible page numbers, in order.
    pub range: Vec<usize>,
    /// Whether an ellipsis is needed between page 1 and the range.
    pub show_start_ellipsis: bool,
    /// Whether an ellipsis is needed between the range and the last page.
    pub show_end_ellipsis: bool,
    /// Whether a standalone first-page button is needed.
    pub show_first_page: bool,
    /// Whether a standalone last-page button is needed.
    pub show_last_page: bool,
}

impl PaginationMeta {
    /// Derive the strip metadata for the given paging position.
    pub fn compute(current_page: usize, total_pages: usize, max_visible: usize) -> Self {
        let range = compute_range(current_page, total_pages, max_visible);

        let (first, last) = match (range.first(), range.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => {
                return Self {
                    range,
                    show_start_ellipsis: false,
                    show_end_ellipsis: false,
                    show_first_page: false,
                    show_last_page: false,
                }
            }
        };

        Self {
            show_start_ellipsis: first > 2,
            show_end_ellipsis: last < total_pages - 1,
            show_first_page: first > 1,
            show_last_page: last < total_pages,
            range,
        }
    }

    /// True when the strip has no pages to show.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}
