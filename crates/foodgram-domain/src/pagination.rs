//! Page-number pagination shared by every list endpoint.

use serde::{Deserialize, Serialize};

/// Pagination parameters taken from the `page` and `limit` query params.
///
/// - `limit`: 1–100, default 6
/// - `page`: ≥ 1, default 1
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
    6
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
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or_else(default_page),
            limit: limit.unwrap_or_else(default_limit),
        }
    }

    /// Clamp `limit` to the valid range 1–100 and `page` to ≥ 1.
    ///
    /// Call after deserializing from query params to enforce bounds.
    pub fn clamped(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, 100),
        }
    }

    /// Zero-based row offset of the first item on this page.
    pub fn offset(self) -> u64 {
        let PageRequest { page, limit } = self.clamped();
        u64::from(page - 1) * u64::from(limit)
    }
}

/// One page of results plus the metadata clients need to walk the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Total number of items across all pages.
    pub count: u64,
    pub next: Option<u32>,
    pub previous: Option<u32>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Wrap one already-sliced page of `results` taken out of `count` items.
    pub fn new(results: Vec<T>, count: u64, request: PageRequest) -> Self {
        let PageRequest { page, limit } = request.clamped();
        let seen = u64::from(page) * u64::from(limit);
        Self {
            count,
            next: page.checked_add(1).filter(|_| seen < count),
            previous: (page > 1).then_some(page - 1),
            results,
        }
    }
}

/// Slice an in-memory list into the requested page.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let request = request.clamped();
    let count = items.len() as u64;
    let results = items
        .into_iter()
        .skip(request.offset() as usize)
        .take(request.limit as usize)
        .collect();
    Page::new(results, count, request)
}
