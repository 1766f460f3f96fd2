//! Page/limit handling shared by list endpoints

use serde::Deserialize;

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;
/// Upper bound for `limit`.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Pagination bounds, configurable per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, serde::Serialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: MAX_PAGE_LIMIT,
        }
    }
}

/// A normalized 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Page below 1 becomes 1, limit is clamped to `1..=max_limit`.
    pub fn new(page: Option<u64>, limit: Option<u64>, config: &PaginationConfig) -> Self {
        let max = config.max_limit.max(1);
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(config.default_limit).clamp(1, max),
        }
    }

    /// Rows to skip. Saturates at `i64::MAX`, the largest OFFSET SQLite binds.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .min(i64::MAX as u64)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None, &PaginationConfig::default())
    }
}

/// Paginated result with the unpaginated match count.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: PageRequest) -> Self {
        Self {
            items,
            total,
            page: page.page,
            limit: page.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let p = PageRequest::default();
        assert_eq!((p.page, p.limit, p.offset()), (1, 10, 0));
    }

    #[test]
    fn clamps_page_and_limit() {
        let cfg = PaginationConfig::default();
        assert_eq!(PageRequest::new(Some(0), Some(0), &cfg), PageRequest { page: 1, limit: 1 });
        assert_eq!(PageRequest::new(Some(3), Some(500), &cfg).limit, 100);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let p = PageRequest::new(Some(2), Some(5), &PaginationConfig::default());
        assert_eq!(p.offset(), 5);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        let p = PageRequest::new(Some(i64::MAX as u64), Some(100), &PaginationConfig::default());
        assert_eq!(p.offset(), i64::MAX as u64);
        let p = PageRequest { page: u64::MAX, limit: 100 };
        assert_eq!(p.offset(), i64::MAX as u64);
    }

    #[test]
    fn result_echoes_page_request() {
        let result = PaginatedResult::new(vec![1, 2], 7, PageRequest { page: 2, limit: 5 });
        assert_eq!((result.total, result.page, result.limit), (7, 2, 5));
    }
}
