//! Page-number pagination.
//!
//! Pages are 1-indexed. A request for page `k` of size `n` covers the half-open
//! range `[(k - 1) * n, k * n)` of the underlying sequence; a page past the end
//! is simply empty.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default page number.
pub const DEFAULT_PAGE: usize = 1;

/// Default page size.
pub const DEFAULT_LIMIT: usize = 15;

/// Largest page size a caller may request.
pub const MAX_LIMIT: usize = 100;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: usize,
    limit: usize,
}

impl Page {
    /// Creates a page request, rejecting `page < 1` and `limit` outside `1..=100`.
    pub fn new(page: usize, limit: usize) -> Result<Self, ValidationError> {
        if page < 1 {
            return Err(ValidationError::invalid(
                "page",
                "must be greater than or equal to 1",
            ));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ValidationError::invalid(
                "limit",
                format!("must be between 1 and {}", MAX_LIMIT),
            ));
        }
        Ok(Self { page, limit })
    }

    /// Returns the 1-indexed page number.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of items skipped before this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Applies this page to an already ordered sequence.
    pub fn apply<T>(&self, items: Vec<T>) -> Paginated<T> {
        let total = items.len();
        let items = items
            .into_iter()
            .skip(self.offset())
            .take(self.limit)
            .collect();
        Paginated { total, items }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus the size of the full sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Number of items before pagination.
    pub total: usize,
    /// The items on this page.
    pub items: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page() {
        let page = Page::default();
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), 15);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_rejects_page_zero() {
        assert!(Page::new(0, 10).is_err());
    }

    #[test]
    fn test_rejects_limit_out_of_range() {
        assert!(Page::new(1, 0).is_err());
        assert!(Page::new(1, 101).is_err());
        assert!(Page::new(1, 100).is_ok());
    }

    #[test]
    fn test_apply_slices_range() {
        let page = Page::new(2, 3).unwrap();
        let result = page.apply((0..10).collect::<Vec<_>>());
        assert_eq!(result.total, 10);
        assert_eq!(result.items, vec![3, 4, 5]);
    }

    #[test]
    fn test_apply_partial_last_page() {
        let page = Page::new(4, 3).unwrap();
        let result = page.apply((0..10).collect::<Vec<_>>());
        assert_eq!(result.items, vec![9]);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = Page::new(9, 5).unwrap();
        let result = page.apply((0..10).collect::<Vec<_>>());
        assert_eq!(result.total, 10);
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let page = Page::new(usize::MAX, 100).unwrap();
        let result = page.apply(vec![1, 2, 3]);
        assert!(result.items.is_empty());
    }
}
