//! Pagination

/// Default number of rows returned by list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Hard upper bound on rows returned by list operations.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Limit/offset window over a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl Page {
    /// Build a page, clamping the limit into `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            offset: offset.unwrap_or(0),
        }
    }

    pub(crate) fn limit_i64(self) -> i64 {
        i64::from(self.limit)
    }

    pub(crate) fn offset_i64(self) -> i64 {
        i64::from(self.offset)
    }
}
