//! Page-window calculation.
//!
//! This module turns a current page, a page size and a total item count into
//! the ordered list of page markers a pagination strip should show. It is
//! pure: no state, no I/O, and identical inputs always produce an identical
//! sequence.
//!
//! # Windowing
//!
//! When [`DisplayOptions::max_visible`] is smaller than the number of pages,
//! only a window of pages is shown:
//!
//! - **Rotate** mode keeps the current page in the middle of the window.
//! - **Block** mode advances the window in fixed blocks of `max_visible` pages.
//!
//! Windows may be decorated with ellipsis markers and, with
//! [`DisplayOptions::boundary_link_numbers`], the literal first and last pages.
//!
//! ```rust
//! use bubbletea_pagewindow::window::{compute_window, DisplayOptions};
//!
//! let options = DisplayOptions::new()
//!     .with_max_visible(5)
//!     .with_boundary_link_numbers(true);
//!
//! let pages = compute_window(5, 10, 100, &options);
//! let labels: Vec<String> = pages.iter().map(|p| p.label().to_string()).collect();
//! assert_eq!(labels, ["1", "2", "3", "4", "5", "6", "7", "…", "10"]);
//! ```

use std::fmt;

/// The text shown for a skipped range of pages.
pub const ELLIPSIS: &str = "…";

/// What a marker displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// A literal page number.
    Number(usize),
    /// A placeholder for a skipped run of pages.
    Ellipsis,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Number(n) => write!(f, "{}", n),
            Label::Ellipsis => f.write_str(ELLIPSIS),
        }
    }
}

/// A single entry of a page window.
///
/// Markers are immutable; every recomputation builds a fresh sequence.
/// For ellipsis markers, [`number`](PageMarker::number) is the first skipped
/// page. It is meant as a stable key, not as a navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageMarker {
    number: usize,
    label: Label,
    active: bool,
}

impl PageMarker {
    /// Creates a numbered page marker.
    pub fn page(number: usize, active: bool) -> Self {
        Self {
            number,
            label: Label::Number(number),
            active,
        }
    }

    /// Creates an ellipsis marker standing in for `number`.
    pub fn ellipsis(number: usize) -> Self {
        Self {
            number,
            label: Label::Ellipsis,
            active: false,
        }
    }

    /// The page this marker refers to.
    pub fn number(&self) -> usize {
        self.number
    }

    /// The displayed label.
    pub fn label(&self) -> Label {
        self.label
    }

    /// Whether this marker is the current page.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether this marker is an ellipsis placeholder.
    pub fn is_ellipsis(&self) -> bool {
        self.label == Label::Ellipsis
    }
}

/// Display constraints for a page window.
///
/// Options are plain values, supplied per render. Build them with the
/// `with_*` methods:
///
/// ```rust
/// use bubbletea_pagewindow::window::DisplayOptions;
///
/// let options = DisplayOptions::new()
///     .with_max_visible(7)
///     .with_rotate(false);
///
/// assert_eq!(options.max_visible, Some(7));
/// assert!(!options.rotate);
/// assert!(!options.boundary_link_numbers);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Maximum number of page buttons. `None` (or `Some(0)`) shows all pages.
    pub max_visible: Option<usize>,
    /// Keep the current page centered instead of paging in blocks.
    pub rotate: bool,
    /// Always show the first and last page numbers around a window.
    pub boundary_link_numbers: bool,
    /// Show ellipses in rotate mode even without boundary numbers.
    pub force_ellipses: bool,
    /// Render first/last controls in the text view. Ignored by the calculator.
    pub boundary_links: bool,
    /// Render previous/next controls in the text view. Ignored by the calculator.
    pub direction_links: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            max_visible: None,
            rotate: true,
            boundary_link_numbers: false,
            force_ellipses: false,
            boundary_links: false,
            direction_links: false,
        }
    }
}

impl DisplayOptions {
    /// Creates options that show every page, in rotate mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the window to `max_visible` page buttons.
    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = Some(max_visible);
        self
    }

    /// Removes the window limit.
    pub fn without_max_visible(mut self) -> Self {
        self.max_visible = None;
        self
    }

    /// Selects rotate (`true`) or block (`false`) windowing.
    pub fn with_rotate(mut self, rotate: bool) -> Self {
        self.rotate = rotate;
        self
    }

    /// Shows literal first/last page numbers around the window.
    pub fn with_boundary_link_numbers(mut self, enabled: bool) -> Self {
        self.boundary_link_numbers = enabled;
        self
    }

    /// Forces ellipses in rotate mode.
    pub fn with_force_ellipses(mut self, enabled: bool) -> Self {
        self.force_ellipses = enabled;
        self
    }

    /// Shows first/last controls in the text view.
    pub fn with_boundary_links(mut self, enabled: bool) -> Self {
        self.boundary_links = enabled;
        self
    }

    /// Shows previous/next controls in the text view.
    pub fn with_direction_links(mut self, enabled: bool) -> Self {
        self.direction_links = enabled;
        self
    }

    /// The window size when windowing applies to `total_pages`.
    fn window_size(&self, total_pages: usize) -> Option<usize> {
        self.max_visible
            .filter(|&size| size > 0 && size < total_pages)
    }

    fn decorates(&self) -> bool {
        !self.rotate || self.force_ellipses || self.boundary_link_numbers
    }
}

/// Number of pages needed for `total_items` at `items_per_page`.
///
/// A page size of zero yields zero pages.
///
/// ```rust
/// use bubbletea_pagewindow::window::total_pages;
///
/// assert_eq!(total_pages(25, 10), 3);
/// assert_eq!(total_pages(0, 10), 0);
/// ```
pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    if items_per_page == 0 {
        return 0;
    }
    total_items.div_ceil(items_per_page)
}

/// Computes the ordered page markers to render.
///
/// `current_page` is not clamped here; callers that need a valid page should
/// pass it through [`crate::paginator::correct`] first. A page beyond the
/// last one simply produces no active marker.
///
/// ```rust
/// use bubbletea_pagewindow::window::{compute_window, DisplayOptions};
///
/// // Rotate mode without decorations shows only the numeric window.
/// let options = DisplayOptions::new().with_max_visible(5);
/// let numbers: Vec<usize> = compute_window(5, 10, 100, &options)
///     .iter()
///     .map(|p| p.number())
///     .collect();
/// assert_eq!(numbers, [3, 4, 5, 6, 7]);
///
/// // No items, no pages.
/// assert!(compute_window(1, 10, 0, &options).is_empty());
/// ```
pub fn compute_window(
    current_page: usize,
    items_per_page: usize,
    total_items: usize,
    options: &DisplayOptions,
) -> Vec<PageMarker> {
    let total = total_pages(total_items, items_per_page);
    let window = options.window_size(total);

    let (start, end) = match window {
        Some(size) if options.rotate => rotated_bounds(current_page, size, total),
        Some(size) => block_bounds(current_page, size, total),
        None => (1, total),
    };

    let mut pages: Vec<PageMarker> = (start..=end)
        .map(|number| PageMarker::page(number, number == current_page))
        .collect();

    if window.is_none() || !options.decorates() {
        return pages;
    }

    let boundary = options.boundary_link_numbers;

    if start > 1 {
        let mut leading = Vec::with_capacity(pages.len() + 4);
        if boundary {
            leading.push(PageMarker::page(1, false));
            // A lone gap of one page would be shown as "…"; show page 2 instead.
            if start == 3 {
                leading.push(PageMarker::page(2, false));
            }
        }
        if !boundary || start > 3 {
            leading.push(PageMarker::ellipsis(start - 1));
        }
        leading.append(&mut pages);
        pages = leading;
    }

    if end < total {
        let remaining = total - end;
        if !boundary || remaining > 2 {
            pages.push(PageMarker::ellipsis(end + 1));
        }
        if boundary {
            if remaining == 2 {
                pages.push(PageMarker::page(total - 1, false));
            }
            pages.push(PageMarker::page(total, false));
        }
    }

    pages
}

fn rotated_bounds(current_page: usize, size: usize, total: usize) -> (usize, usize) {
    let start = current_page.saturating_sub(size / 2).max(1);
    let end = start.saturating_add(size - 1);
    if end > total {
        (total - size + 1, total)
    } else {
        (start, end)
    }
}

fn block_bounds(current_page: usize, size: usize, total: usize) -> (usize, usize) {
    let block = current_page.div_ceil(size).saturating_sub(1);
    let start = block.saturating_mul(size).saturating_add(1);
    let end = start.saturating_add(size - 1).min(total);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn labels(pages: &[PageMarker]) -> Vec<String> {
        pages
            .iter()
            .map(|p| {
                if p.is_active() {
                    format!("{}*", p.label())
                } else {
                    p.label().to_string()
                }
            })
            .collect()
    }

    fn windowed(max_visible: usize) -> DisplayOptions {
        DisplayOptions::new().with_max_visible(max_visible)
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 0), 0);
    }

    #[test]
    fn test_full_range_without_limit() {
        let pages = compute_window(2, 10, 45, &DisplayOptions::default());
        assert_eq!(labels(&pages), ["1", "2*", "3", "4", "5"]);
    }

    #[test]
    fn test_zero_items_is_empty() {
        assert!(compute_window(1, 10, 0, &DisplayOptions::default()).is_empty());
        assert!(compute_window(1, 10, 0, &windowed(5)).is_empty());
    }

    #[test]
    fn test_rotate_without_decorations() {
        // Truncated, but rotate mode with no ellipsis options stays bare.
        let pages = compute_window(5, 10, 100, &windowed(5));
        assert_eq!(labels(&pages), ["3", "4", "5*", "6", "7"]);
    }

    #[test]
    fn test_rotate_with_boundary_numbers() {
        let options = windowed(5).with_boundary_link_numbers(true);
        let pages = compute_window(5, 10, 100, &options);
        assert_eq!(
            labels(&pages),
            ["1", "2", "3", "4", "5*", "6", "7", "…", "10"]
        );
        // Boundary markers are never active, and the ellipsis keys the skipped page.
        assert!(!pages[0].is_active());
        assert!(pages[7].is_ellipsis());
        assert_eq!(pages[7].number(), 8);
    }

    #[test]
    fn test_rotate_with_forced_ellipses() {
        let options = windowed(5).with_force_ellipses(true);
        let pages = compute_window(5, 10, 100, &options);
        assert_eq!(labels(&pages), ["…", "3", "4", "5*", "6", "7", "…"]);
        assert_eq!(pages[0].number(), 2);
        assert_eq!(pages[6].number(), 8);
    }

    #[test]
    fn test_rotate_clamps_at_end() {
        let pages = compute_window(10, 10, 100, &windowed(5));
        assert_eq!(labels(&pages), ["6", "7", "8", "9", "10*"]);

        let pages = compute_window(1, 10, 100, &windowed(5));
        assert_eq!(labels(&pages), ["1*", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_rotate_even_window() {
        let pages = compute_window(5, 10, 100, &windowed(4));
        assert_eq!(labels(&pages), ["3", "4", "5*", "6"]);
    }

    #[test]
    fn test_block_mode() {
        let options = windowed(5).with_rotate(false);

        let pages = compute_window(2, 10, 100, &options);
        assert_eq!(labels(&pages), ["1", "2*", "3", "4", "5", "…"]);
        assert_eq!(pages[5].number(), 6);

        let pages = compute_window(7, 10, 100, &options);
        assert_eq!(labels(&pages), ["…", "6", "7*", "8", "9", "10"]);
        assert_eq!(pages[0].number(), 5);
    }

    #[test]
    fn test_block_mode_partial_last_block() {
        let options = windowed(4).with_rotate(false);
        let pages = compute_window(9, 10, 95, &options);
        assert_eq!(labels(&pages), ["…", "9*", "10"]);
    }

    #[test]
    fn test_boundary_numbers_near_start() {
        let options = windowed(5).with_boundary_link_numbers(true);
        let pages = compute_window(1, 10, 100, &options);
        assert_eq!(labels(&pages), ["1*", "2", "3", "4", "5", "…", "10"]);

        // start == 2: page 1 joins without an ellipsis.
        let pages = compute_window(4, 10, 100, &options);
        assert_eq!(
            labels(&pages),
            ["1", "2", "3", "4*", "5", "6", "…", "10"]
        );
    }

    #[test]
    fn test_boundary_numbers_far_from_start() {
        let options = windowed(5).with_boundary_link_numbers(true);
        let pages = compute_window(8, 10, 100, &options);
        assert_eq!(labels(&pages), ["1", "…", "6", "7", "8*", "9", "10"]);
        assert_eq!(pages[1].number(), 5);
    }

    #[test]
    fn test_boundary_numbers_near_end() {
        let options = windowed(5).with_boundary_link_numbers(true);

        // end == total - 2: second-to-last page fills the gap.
        let pages = compute_window(6, 10, 100, &options);
        assert_eq!(
            labels(&pages),
            ["1", "…", "4", "5", "6*", "7", "8", "9", "10"]
        );

        // end == total - 1: only the last page is appended.
        let pages = compute_window(7, 10, 100, &options);
        assert_eq!(labels(&pages), ["1", "…", "5", "6", "7*", "8", "9", "10"]);
    }

    #[test]
    fn test_boundary_numbers_at_usize_max() {
        let max = usize::MAX;
        let options = windowed(3).with_boundary_link_numbers(true);

        let pages = compute_window(max - 2, 1, max, &options);
        let numbers: Vec<usize> = pages.iter().map(|p| p.number()).collect();
        assert_eq!(numbers, [1, max - 4, max - 3, max - 2, max - 1, max]);
        assert!(pages[1].is_ellipsis());
        assert!(pages[3].is_active());
        assert!(!pages[5].is_ellipsis());

        let pages = compute_window(max - 3, 1, max, &options);
        let numbers: Vec<usize> = pages.iter().map(|p| p.number()).collect();
        assert_eq!(numbers, [1, max - 5, max - 4, max - 3, max - 2, max - 1, max]);
        assert!(pages.iter().skip(2).all(|p| !p.is_ellipsis()));
    }

    #[test]
    fn test_window_not_smaller_than_total() {
        let options = windowed(5).with_rotate(false).with_force_ellipses(true);
        let pages = compute_window(3, 10, 50, &options);
        assert_eq!(labels(&pages), ["1", "2", "3*", "4", "5"]);
    }

    #[test]
    fn test_zero_max_visible_shows_all_pages() {
        let options = windowed(0).with_rotate(false).with_boundary_link_numbers(true);
        let pages = compute_window(2, 10, 30, &options);
        assert_eq!(labels(&pages), ["1", "2*", "3"]);
    }

    #[test]
    fn test_current_page_is_not_clamped() {
        let pages = compute_window(0, 10, 30, &DisplayOptions::default());
        assert_eq!(labels(&pages), ["1", "2", "3"]);

        let pages = compute_window(9, 10, 30, &DisplayOptions::default());
        assert!(pages.iter().all(|p| !p.is_active()));
    }

    #[test]
    fn test_block_mode_with_out_of_range_page() {
        let options = windowed(2).with_rotate(false);
        let pages = compute_window(9, 10, 50, &options);
        // Block [9, 10] lies beyond the 5 pages; only the leading ellipsis remains.
        assert_eq!(labels(&pages), ["…"]);
        assert_eq!(pages[0].number(), 8);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Label::Number(12).to_string(), "12");
        assert_eq!(Label::Ellipsis.to_string(), ELLIPSIS);
    }

    prop_compose! {
        fn arb_options()(
            max_visible in proptest::option::of(0usize..12),
            rotate in any::<bool>(),
            boundary_link_numbers in any::<bool>(),
            force_ellipses in any::<bool>(),
        ) -> DisplayOptions {
            DisplayOptions {
                max_visible,
                rotate,
                boundary_link_numbers,
                force_ellipses,
                ..DisplayOptions::default()
            }
        }
    }

    proptest! {
        #[test]
        fn test_window_is_ascending_with_one_active(
            per_page in 1usize..20,
            total_items in 0usize..500,
            current_offset in 0usize..40,
            options in arb_options(),
        ) {
            let total = total_pages(total_items, per_page);
            let current = current_offset.min(total).max(1);
            let pages = compute_window(current, per_page, total_items, &options);

            for pair in pages.windows(2) {
                prop_assert!(pair[0].number() < pair[1].number());
            }

            let active: Vec<_> = pages.iter().filter(|p| p.is_active()).collect();
            prop_assert!(active.len() <= 1);
            if total > 0 {
                prop_assert_eq!(active.len(), 1);
                prop_assert_eq!(active[0].number(), current);
            }
            for page in &pages {
                prop_assert!(page.number() >= 1 && page.number() <= total);
                if page.is_ellipsis() {
                    prop_assert!(!page.is_active());
                }
            }
        }

        #[test]
        fn test_window_respects_max_visible(
            per_page in 1usize..20,
            total_items in 1usize..500,
            current_offset in 1usize..40,
            max_visible in 1usize..10,
            rotate in any::<bool>(),
        ) {
            let total = total_pages(total_items, per_page);
            let current = current_offset.min(total);
            let options = DisplayOptions::new()
                .with_max_visible(max_visible)
                .with_rotate(rotate);
            let pages = compute_window(current, per_page, total_items, &options);

            let numbers: Vec<usize> = pages
                .iter()
                .filter(|p| !p.is_ellipsis())
                .map(|p| p.number())
                .collect();
            prop_assert!(numbers.len() <= max_visible.min(total));
            if rotate {
                prop_assert_eq!(numbers.len(), max_visible.min(total));
            }
            // Numeric markers form one contiguous run.
            for pair in numbers.windows(2) {
                prop_assert_eq!(pair[0] + 1, pair[1]);
            }
            prop_assert!(numbers.contains(&current));
        }

        #[test]
        fn test_window_is_deterministic(
            current in 0usize..60,
            per_page in 1usize..20,
            total_items in 0usize..500,
            options in arb_options(),
        ) {
            let first = compute_window(current, per_page, total_items, &options);
            let second = compute_window(current, per_page, total_items, &options);
            prop_assert_eq!(first, second);
        }
    }
}
