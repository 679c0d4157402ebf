//! Page/limit pagination math shared by list endpoints and repositories.
//!
//! Pagination is plain offset/limit; pages may shift if rows are inserted
//! between requests.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: i64 = 12;
pub const MAX_PAGE_SIZE: i64 = 100;

/// A resolved page request. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    /// Clamp user-supplied values: `page >= 1`, `1 <= limit <= max_limit`,
    /// and a missing or zero limit falls back to `default_limit`.
    pub fn resolve(page: Option<i64>, limit: Option<i64>, default_limit: i64, max_limit: i64) -> Self {
        let limit = match limit {
            None | Some(0) => default_limit,
            Some(l) => l.clamp(1, max_limit),
        };
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.min(max_limit),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn info(&self, total: i64) -> PageInfo {
        let total_pages = if total <= 0 {
            0
        } else {
            (total + self.limit - 1) / self.limit
        };
        PageInfo {
            page: self.page,
            limit: self.limit,
            total,
            total_pages,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination block included in list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}
