//! Page window and page-number list computation.
//!
//! Pure functions with no state and no failure modes. Page numbers are
//! 1-based. None of these functions clamp the current page: keeping it within
//! `1..=total_pages` is the caller's policy (see [`clamp_page`]).

use std::fmt;
use std::ops::Range;

/// Maximum number of slots in a page-number list.
pub const MAX_VISIBLE_SLOTS: usize = 7;

/// Page numbers shown before the trailing ellipsis near the start.
const LEADING_PAGES: usize = 5;

/// One entry of the page-number bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(page) => write!(f, "{page}"),
            Self::Ellipsis => f.write_str("..."),
        }
    }
}

/// Half-open index range of `current_page` within the full ordered list.
///
/// The window depends only on the page and page size, so the item count is
/// not a parameter. The range is not clamped to the list length; [`slice`]
/// takes the list and clamps.
///
/// # Examples
///
/// ```
/// use roster::app::pagination::{page_slice, slice};
///
/// assert_eq!(page_slice(2, 4), 4..8);
///
/// let records = [1, 2, 3, 4, 5];
/// assert_eq!(slice(&records, 2, 4), &[5]);
/// ```
#[must_use]
pub fn page_slice(current_page: usize, items_per_page: usize) -> Range<usize> {
    let start = current_page.saturating_sub(1).saturating_mul(items_per_page);
    start..start.saturating_add(items_per_page)
}

/// Number of pages for `total_items`, never less than 1.
///
/// An `items_per_page` of 0 is treated as 1.
///
/// # Examples
///
/// ```
/// use roster::app::pagination::total_pages;
///
/// assert_eq!(total_pages(15, 10), 2);
/// assert_eq!(total_pages(0, 10), 1);
/// assert_eq!(total_pages(10, 10), 1);
/// ```
#[must_use]
pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    let per_page = items_per_page.max(1);
    let pages = total_items / per_page + usize::from(total_items % per_page != 0);
    pages.max(1)
}

/// The items of `current_page`, clamped to what exists.
#[must_use]
pub fn slice<T>(items: &[T], current_page: usize, items_per_page: usize) -> &[T] {
    let range = page_slice(current_page, items_per_page);
    let start = range.start.min(items.len());
    let end = range.end.min(items.len());
    &items[start..end]
}

/// Whether `page` is a page the bar would accept.
#[must_use]
pub const fn is_valid_page(page: usize, total_pages: usize) -> bool {
    page >= 1 && page <= total_pages
}

/// Moves `page` into `1..=total_pages`.
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Page numbers to show, collapsing runs into ellipses.
///
/// - up to 7 pages: every page
/// - current page within the first 4: `1 2 3 4 5 … N`
/// - current page within the last 4: `1 … N-4 N-3 N-2 N-1 N`
/// - otherwise: `1 … c-1 c c+1 … N`
///
/// # Examples
///
/// ```
/// use roster::app::pagination::{page_number_display_list, PageSlot::{Ellipsis, Page}};
///
/// assert_eq!(
///     page_number_display_list(5, 10),
///     vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
/// );
/// ```
#[must_use]
pub fn page_number_display_list(current_page: usize, total_pages: usize) -> Vec<PageSlot> {
    if total_pages <= MAX_VISIBLE_SLOTS {
        return (1..=total_pages).map(PageSlot::Page).collect();
    }

    let mut slots = Vec::with_capacity(MAX_VISIBLE_SLOTS);
    if current_page <= 4 {
        slots.extend((1..=LEADING_PAGES).map(PageSlot::Page));
        slots.push(PageSlot::Ellipsis);
        slots.push(PageSlot::Page(total_pages));
    } else if current_page >= total_pages - 3 {
        slots.push(PageSlot::Page(1));
        slots.push(PageSlot::Ellipsis);
        slots.extend((total_pages - 4..=total_pages).map(PageSlot::Page));
    } else {
        slots.push(PageSlot::Page(1));
        slots.push(PageSlot::Ellipsis);
        slots.extend((current_page - 1..=current_page + 1).map(PageSlot::Page));
        slots.push(PageSlot::Ellipsis);
        slots.push(PageSlot::Page(total_pages));
    }
    slots
}
