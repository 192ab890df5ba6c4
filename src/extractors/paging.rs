// src/extractors/paging.rs
use crate::wiki::models::{PageInfo, PagedCollection};

/// Slices page `page` (1-based) out of `items`. Pages past the end come back empty with
/// the real totals; `size` in the metadata is the length of the returned slice.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> PagedCollection<T> {
    let total = items.len();
    let total_pages = if page_size == 0 { 0 } else { total.div_ceil(page_size) };

    let start = page.saturating_sub(1).saturating_mul(page_size);
    let data: Vec<T> = if page == 0 || page_size == 0 || start >= total {
        Vec::new()
    } else {
        items.into_iter().skip(start).take(page_size).collect()
    };

    PagedCollection {
        page: PageInfo {
            total,
            size: data.len(),
            total_pages,
            current_page: page,
        },
        data,
    }
}
