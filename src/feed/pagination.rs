//! Page arithmetic for the review list.
//!
//! Pagination is a pure view over the sorted list: it never mutates or
//! reorders entries, and page numbers are always clamped into range.

use super::models::Review;

/// Number of reviews shown per page on the site.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Current page state for a paginated view.
///
/// # Example
///
/// ```
/// use reviewfeed::feed::pagination::PageInfo;
///
/// let info = PageInfo::new(2, 6, 3);
/// assert!(!info.is_first_page());
/// assert!(info.has_next());
/// assert!(info.has_prev());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page number (1-based).
    current_page: usize,
    /// Items per page.
    per_page: usize,
    /// Total number of pages; at least one.
    total_pages: usize,
}

impl PageInfo {
    /// Creates a page info instance from already-clamped values.
    #[must_use]
    pub const fn new(current_page: usize, per_page: usize, total_pages: usize) -> Self {
        Self {
            current_page,
            per_page,
            total_pages,
        }
    }

    /// Returns the current page number (1-based).
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns the number of items per page.
    #[must_use]
    pub const fn per_page(&self) -> usize {
        self.per_page
    }

    /// Returns the total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Returns true if more pages exist after the current one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Returns true if pages exist before the current one.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Returns true if this is the first page.
    #[must_use]
    pub const fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    /// Returns true if this is the last page.
    #[must_use]
    pub const fn is_last_page(&self) -> bool {
        !self.has_next()
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE, 1)
    }
}

/// One page of reviews borrowed from the sorted list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewPage<'a> {
    /// Reviews on this page, in list order.
    pub items: &'a [Review],
    /// Position of this page within the list.
    pub page_info: PageInfo,
}

/// Returns the number of pages needed for `count` entries.
///
/// An empty list still has one (empty) page. A `per_page` of zero is treated
/// as one.
#[must_use]
pub const fn total_pages(count: usize, per_page: usize) -> usize {
    let divisor = if per_page == 0 { 1 } else { per_page };
    let pages = count.div_ceil(divisor);
    if pages == 0 { 1 } else { pages }
}

/// Clamps a requested page number into `[1, total_pages]`.
#[must_use]
pub fn clamp_page(page: usize, count: usize, per_page: usize) -> usize {
    page.clamp(1, total_pages(count, per_page))
}

/// Returns the slice `[(page-1)*per_page, page*per_page)` of `reviews`.
///
/// `page` is clamped into range first.
///
/// # Example
///
/// ```
/// use reviewfeed::feed::pagination::paginate;
///
/// let page = paginate(&[], 4, 6);
/// assert!(page.items.is_empty());
/// assert_eq!(page.page_info.total_pages(), 1);
/// assert_eq!(page.page_info.current_page(), 1);
/// ```
#[must_use]
pub fn paginate(reviews: &[Review], page: usize, per_page: usize) -> ReviewPage<'_> {
    let page_size = per_page.max(1);
    let total = total_pages(reviews.len(), page_size);
    let current = page.clamp(1, total);
    let start = (current - 1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(reviews.len());
    let items = reviews.get(start..end).unwrap_or_default();

    ReviewPage {
        items,
        page_info: PageInfo::new(current, page_size, total),
    }
}
