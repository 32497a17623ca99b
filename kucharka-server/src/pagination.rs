//! Pagination utilities for recipe listings

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: u32,
    /// Total number of pages
    pub total_pages: u32,
    /// Index of the first item on the page
    pub offset: usize,
}

/// Calculate pagination metadata from total results and requested page
///
/// Ensures page is within valid bounds [1, total_pages]. `page_size` must be
/// non-zero; callers validate it before getting here.
///
/// # Examples
/// ```
/// use kucharka_server::pagination::calculate_pagination;
///
/// // 30 recipes at 12 per page = 3 pages (12 + 12 + 6)
/// let p = calculate_pagination(30, 12, 2);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(p.offset, 12);
///
/// // Requesting out-of-bounds page gets clamped
/// let p = calculate_pagination(30, 12, 99);
/// assert_eq!(p.page, 3);
/// assert_eq!(p.offset, 24);
/// ```
pub fn calculate_pagination(total_results: u32, page_size: u32, requested_page: u32) -> Pagination {
    let page_size = page_size.max(1);
    let total_pages = total_results.div_ceil(page_size);
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page as usize - 1) * page_size as usize;

    Pagination {
        page,
        total_pages,
        offset,
    }
}
