//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use filefort_core::types::pagination::{MAX_PAGE_SIZE, PageRequest};

/// Query parameters for paginated endpoints: `?page=&rows=`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number, 1-based.
    pub page: Option<i64>,
    /// Items per page.
    pub rows: Option<i64>,
}

impl PaginationParams {
    /// Converts to a clamped `PageRequest`.
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::clamped(
            self.page.unwrap_or(1),
            self.rows.unwrap_or(MAX_PAGE_SIZE as i64),
        )
    }
}
