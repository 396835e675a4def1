//! Page window for list queries
//!
//! # Example
//!
//! ```rust
//! use user_service::repository::PageWindow;
//!
//! // Third page of 20 items
//! let window = PageWindow::from_page(3, 20).unwrap();
//! assert_eq!(window.offset, 40);
//! assert_eq!(window.limit, 20);
//!
//! // Pages are 1-based
//! assert!(PageWindow::from_page(0, 20).is_none());
//! ```

/// Default page size when the caller does not supply one
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest page size accepted from callers
pub const MAX_LIMIT: u32 = 100;

/// Window of rows to return: at most `limit` rows, skipping `offset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Maximum number of rows to return
    pub limit: u32,
    /// Number of rows to skip
    pub offset: u64,
}

impl PageWindow {
    /// Create a window from a raw limit and offset
    #[must_use]
    pub const fn new(limit: u32, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// Create a window from a 1-based page number and a page size
    ///
    /// Returns `None` when `page` or `limit` is zero. The offset is
    /// `(page - 1) * limit` and cannot overflow.
    ///
    /// # Example
    ///
    /// ```rust
    /// use user_service::repository::PageWindow;
    ///
    /// assert_eq!(PageWindow::from_page(1, 10), Some(PageWindow::new(10, 0)));
    /// assert_eq!(PageWindow::from_page(2, 10), Some(PageWindow::new(10, 10)));
    /// assert_eq!(PageWindow::from_page(1, 0), None);
    /// ```
    #[must_use]
    pub const fn from_page(page: u32, limit: u32) -> Option<Self> {
        if page == 0 || limit == 0 {
            return None;
        }
        let offset = (page as u64 - 1) * limit as u64;
        Some(Self { limit, offset })
    }

    /// Limit as a signed SQL argument
    #[must_use]
    pub fn sql_limit(&self) -> i64 {
        i64::from(self.limit)
    }

    /// Offset as a signed SQL argument, saturating at `i64::MAX`
    #[must_use]
    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let window = PageWindow::default();
        assert_eq!(window.limit, DEFAULT_LIMIT);
        assert_eq!(window.offset, 0);
    }

    #[test]
    fn test_from_page_offset_calculation() {
        assert_eq!(PageWindow::from_page(1, 25).unwrap().offset, 0);
        assert_eq!(PageWindow::from_page(4, 25).unwrap().offset, 75);
    }

    #[test]
    fn test_from_page_rejects_zero() {
        assert!(PageWindow::from_page(0, 10).is_none());
        assert!(PageWindow::from_page(1, 0).is_none());
    }

    #[test]
    fn test_from_page_large_values_do_not_overflow() {
        let window = PageWindow::from_page(u32::MAX, u32::MAX).unwrap();
        assert_eq!(window.offset, (u64::from(u32::MAX) - 1) * u64::from(u32::MAX));
    }

    #[test]
    fn test_sql_offset_saturates() {
        let window = PageWindow::new(10, u64::MAX);
        assert_eq!(window.sql_offset(), i64::MAX);
        assert_eq!(window.sql_limit(), 10);
    }
}
