//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::errors::{AppError, AppResult};

/// Pagination query parameters (reusable across all list endpoints)
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_per_page() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }
    }

    /// Calculate offset for database query (saturating)
    pub fn offset(&self) -> u64 {
        self.page_index().saturating_mul(self.limit())
    }

    /// Offset as the database accepts it.
    ///
    /// SQL offsets are signed 64-bit, so a page past `i64::MAX` rows is
    /// rejected instead of overflowing in the paginator.
    pub fn checked_offset(&self) -> AppResult<u64> {
        self.page_index()
            .checked_mul(self.limit())
            .filter(|offset| *offset <= i64::MAX as u64)
            .ok_or_else(|| AppError::bad_request(format!("page {} is out of range", self.page)))
    }

    /// Get limit capped at maximum (and never zero)
    pub fn limit(&self) -> u64 {
        self.per_page.clamp(1, MAX_PAGE_SIZE)
    }

    /// Zero-based page index for SeaORM paginators
    pub fn page_index(&self) -> u64 {
        self.page.max(1) - 1
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        let total_pages = if per_page > 0 {
            total.div_ceil(per_page)
        } else {
            0
        };

        Self {
            data,
            meta: PaginationMeta {
                page,
                per_page,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_capped() {
        let params = PaginationParams::new(1, 1_000);
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
        assert_eq!(PaginationParams::new(1, 0).limit(), 1);
    }

    #[test]
    fn test_offset_and_index() {
        let params = PaginationParams::new(3, 10);
        assert_eq!(params.offset(), 20);
        assert_eq!(params.page_index(), 2);
        assert_eq!(PaginationParams::new(0, 10).page_index(), 0);
    }

    #[test]
    fn test_huge_page_is_rejected() {
        let params = PaginationParams::new(1_000_000_000_000_000_000, MAX_PAGE_SIZE);
        assert!(matches!(params.checked_offset(), Err(AppError::BadRequest(_))));
        assert_eq!(params.offset(), u64::MAX);

        let params = PaginationParams::new(u64::MAX, 1);
        assert!(params.checked_offset().is_err());
    }

    #[test]
    fn test_largest_page_within_signed_offset() {
        let params = PaginationParams::new(i64::MAX as u64 + 1, 1);
        assert_eq!(params.checked_offset().unwrap(), i64::MAX as u64);
    }

    #[test]
    fn test_total_pages() {
        let page: Paginated<u8> = Paginated::new(vec![], 1, 20, 41);
        assert_eq!(page.meta.total_pages, 3);
    }
}
