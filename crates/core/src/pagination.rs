//! Page-based pagination helpers.
//!
//! This module lives in `core` (zero internal deps) so the same clamping
//! rules apply wherever a paginated listing is produced.

use serde::Serialize;

/// Default page size when the caller supplies none.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size accepted at the API boundary.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a 1-based page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a page size into `[1, MAX_PAGE_SIZE]`, defaulting when absent.
pub fn clamp_page_size(page_size: Option<i64>) -> i64 {
    page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Pagination metadata returned alongside every paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageInfo {
    /// Compute the metadata for `total` items viewed at `page`/`page_size`.
    ///
    /// `total_pages` is zero for an empty result, in which case neither
    /// direction has a next page.
    pub fn new(page: i64, page_size: i64, total: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + page_size - 1) / page_size
        };
        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1 && total > 0,
        }
    }
}

/// Slice one page out of an already-sorted, already-merged list.
///
/// Pages past the end yield an empty slice, not an error. The offset is
/// computed with saturating arithmetic so an absurdly large page number
/// cannot overflow; it just lands past the end.
pub fn paginate<T>(items: Vec<T>, page: i64, page_size: i64) -> Vec<T> {
    let start = usize::try_from((page - 1).saturating_mul(page_size)).unwrap_or(usize::MAX);
    items
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect()
}
