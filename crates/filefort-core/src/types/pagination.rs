//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Default and maximum page size.
pub const MAX_PAGE_SIZE: u64 = 20;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
}

impl PageRequest {
    /// Build a page request from raw, possibly out-of-range client values.
    ///
    /// A page below 1 becomes 1. A row count below 1 or above
    /// [`MAX_PAGE_SIZE`] becomes [`MAX_PAGE_SIZE`].
    pub fn clamped(page: i64, rows: i64) -> Self {
        let page = if page < 1 { 1 } else { page as u64 };
        let page_size = if rows < 1 || rows as u64 > MAX_PAGE_SIZE {
            MAX_PAGE_SIZE
        } else {
            rows as u64
        };
        Self { page, page_size }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl<T: Serialize> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, request: &PageRequest, total_items: u64) -> Self {
        let total_pages = if total_items == 0 {
            1
        } else {
            total_items.div_ceil(request.page_size)
        };
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total_items,
            total_pages,
        }
    }

    /// Convert every item, keeping the paging metadata.
    pub fn map<U: Serialize>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(PageRequest::clamped(0, 0), PageRequest { page: 1, page_size: 20 });
        assert_eq!(PageRequest::clamped(-4, 50), PageRequest { page: 1, page_size: 20 });
        assert_eq!(PageRequest::clamped(3, 21), PageRequest { page: 3, page_size: 20 });
        assert_eq!(PageRequest::clamped(2, 5), PageRequest { page: 2, page_size: 5 });
        assert_eq!(PageRequest::clamped(1, 20), PageRequest { page: 1, page_size: 20 });
    }

    #[test]
    fn offset_follows_page() {
        let request = PageRequest::clamped(3, 10);
        assert_eq!(request.offset(), 20);
        assert_eq!(request.limit(), 10);
    }

    #[test]
    fn total_pages_rounds_up() {
        let request = PageRequest::clamped(1, 20);
        let page = PageResponse::new(vec![1, 2, 3], &request, 41);
        assert_eq!(page.total_pages, 3);

        let empty: PageResponse<u8> = PageResponse::new(Vec::new(), &request, 0);
        assert_eq!(empty.total_pages, 1);
    }
}
