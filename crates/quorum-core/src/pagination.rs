//! Page-number pagination shared by list queries.

use serde::Deserialize;

/// Items per page for every list query.
pub const PAGE_SIZE: usize = 20;

/// 1-based page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PaginationParams {
    /// Requested page; values below 1 are treated as 1.
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self { page: first_page() }
    }
}

impl PaginationParams {
    /// Creates params for `page`.
    #[must_use]
    pub fn new(page: u32) -> Self {
        Self { page }
    }

    /// Index of the first item on this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * PAGE_SIZE
    }

    /// Returns the slice of `items` that falls on this page.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = (start + PAGE_SIZE).min(items.len());
        &items[start..end]
    }
}
