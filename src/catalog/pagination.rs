//! Page slicing for list views.

use serde::Serialize;

/// Largest number of page links shown at once
const MAX_VISIBLE_PAGES: usize = 5;

/// One page of a list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    /// Page numbers to render as links
    pub window: Vec<usize>,
}

/// Slice `items` into the requested 1-based page.
///
/// Page 0 is read as page 1; a page past the end is empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let start = (page - 1).saturating_mul(per_page);
    let slice = items
        .iter()
        .skip(start)
        .take(per_page)
        .cloned()
        .collect();

    Page {
        items: slice,
        page,
        per_page,
        total_items,
        total_pages,
        has_previous: page > 1,
        has_next: page < total_pages,
        window: page_window(page, total_pages),
    }
}

fn page_window(page: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = page.min(total_pages);

    let mut start = current.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
    let end = (start + MAX_VISIBLE_PAGES - 1).min(total_pages);
    if end + 1 - start < MAX_VISIBLE_PAGES {
        start = (end + 1).saturating_sub(MAX_VISIBLE_PAGES).max(1);
    }

    (start..=end).collect()
}
