//! Page-number pagination shared across list endpoints.

use serde::{Deserialize, Serialize};

/// Page size used when the client does not send `limit`.
pub const DEFAULT_LIMIT: u32 = 6;

/// Upper bound for `limit`.
pub const MAX_LIMIT: u32 = 100;

/// Pagination parameters.
///
/// - `page`: ≥ 1, default 1
/// - `limit`: 1–100, default [`DEFAULT_LIMIT`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageRequest {
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        Self {
            page: page.unwrap_or(1),
            limit: limit.unwrap_or(default_limit),
        }
        .clamped()
    }

    /// Clamp `limit` to 1–100 and `page` to ≥ 1.
    pub fn clamped(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        let p = self.clamped();
        u64::from(p.page - 1) * u64::from(p.limit)
    }
}

/// One page of results together with the total row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, count: u64) -> Self {
        Self { items, count }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
        }
    }

    /// Whether a page after `request` exists.
    pub fn has_next(&self, request: PageRequest) -> bool {
        let r = request.clamped();
        u64::from(r.page) * u64::from(r.limit) < self.count
    }

    /// Whether a page before `request` exists.
    pub fn has_previous(&self, request: PageRequest) -> bool {
        request.clamped().page > 1
    }
}
