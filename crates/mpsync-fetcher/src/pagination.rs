//! Page-index pagination for the product-listing endpoint.
//!
//! Pages are requested as `?page=<index>&size=<n>` starting at index 0. Each
//! response declares how much is left in one of three ways, checked in order:
//!
//! 1. `totalPages`: stop once `index + 1 >= totalPages`.
//! 2. `totalElements`: stop once `(index + 1) * size >= totalElements`.
//! 3. Neither: stop on an empty or short page (`content.len() < size`).

use crate::types::CatalogPage;

/// Returns `true` if another page should be requested after `page`, which
/// was fetched at `page_index` with `page_size` items per page.
#[must_use]
pub fn has_next_page(page: &CatalogPage, page_index: u32, page_size: u32) -> bool {
    let fetched_pages = u64::from(page_index) + 1;

    if let Some(total_pages) = page.total_pages {
        return fetched_pages < u64::from(total_pages);
    }

    if let Some(total_elements) = page.total_elements {
        return fetched_pages * u64::from(page_size) < total_elements;
    }

    !page.content.is_empty() && page.content.len() >= page_size as usize
}
