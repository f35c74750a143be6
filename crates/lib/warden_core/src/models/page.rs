//! Offset pagination.

use serde::Serialize;

/// Default page size.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest page size a client may ask for.
pub const MAX_LIMIT: u32 = 100;

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub next_page: Option<u32>,
    pub has_prev_page: bool,
    pub prev_page: Option<u32>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        let limit = u64::from(request.limit.max(1));
        let total_pages = u32::try_from(total.div_ceil(limit)).unwrap_or(u32::MAX);
        let page = request.page;
        let has_next_page = page < total_pages;
        let has_prev_page = page > 1;
        Self {
            items,
            total,
            page,
            limit: request.limit,
            total_pages,
            has_next_page,
            next_page: has_next_page.then(|| page + 1),
            has_prev_page,
            prev_page: has_prev_page.then(|| page - 1),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            has_next_page: self.has_next_page,
            next_page: self.next_page,
            has_prev_page: self.has_prev_page,
            prev_page: self.prev_page,
        }
    }
}
