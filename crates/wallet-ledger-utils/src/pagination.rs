//! Page slicing for table views

use serde::Serialize;

/// One page of a longer list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    /// At least 1, even for an empty list
    pub total_pages: usize,
    /// 0-based index of the first item on this page
    pub start_index: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Take page `page` (1-based) of `items`.
///
/// Out-of-range pages are clamped to the first or last page and a zero
/// page size is treated as 1.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let start_index = (page - 1) * per_page;
    let end_index = (start_index + per_page).min(total_items);

    Page {
        items: items[start_index..end_index].to_vec(),
        page,
        per_page,
        total_items,
        total_pages,
        start_index,
    }
}
