//! Page request/response types for service-layer listings.
//!
//! Page numbers are 0-based, matching the `?page=N` query of the store list.

use serde::Serialize;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page index
    pub page: u64,
    /// items per page
    pub size: u64,
}

impl PageRequest {
    pub const MAX_SIZE: u64 = 100;

    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size: size.clamp(1, Self::MAX_SIZE) }
    }
}

/// One page of results plus the totals needed to render pagination.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    /// 0-based index of this page
    pub number: u64,
    pub size: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64, req: PageRequest) -> Self {
        Self {
            content,
            total_elements,
            total_pages: total_elements.div_ceil(req.size.max(1)),
            number: req.page,
            size: req.size,
        }
    }

    pub fn is_first(&self) -> bool { self.number == 0 }

    pub fn is_last(&self) -> bool { self.number + 1 >= self.total_pages }

    pub fn has_next(&self) -> bool { self.number + 1 < self.total_pages }

    pub fn has_previous(&self) -> bool { self.number > 0 }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
        }
    }
}
