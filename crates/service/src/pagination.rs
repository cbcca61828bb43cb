//! Pagination utilities for the dashboard views
//!
//! Provides a simple `Pagination` struct plus the page-info math used by
//! both client-side slices (players, keys) and server-side pages (activities).

use serde::Serialize;

pub const PLAYERS_PAGE_SIZE: u32 = 25;
pub const KEYS_PAGE_SIZE: u32 = 25;
pub const ACTIVITIES_PAGE_SIZE: u32 = 50;

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: Option<u32>, per_page: u32) -> Self {
        Self { page: page.unwrap_or(1), per_page }.normalized()
    }

    /// Clamp to sane defaults: page >= 1, per_page in 1..=100.
    pub fn normalized(self) -> Self {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        Self { page, per_page }
    }

    /// Zero-based index of the first item on this page.
    pub fn offset(self) -> u64 {
        let p = self.normalized();
        (p.page as u64 - 1) * p.per_page as u64
    }

    pub fn limit(self) -> u64 {
        self.normalized().per_page as u64
    }

    /// Slice an in-memory list; an out-of-range page is pulled back to the last one.
    pub fn slice<T>(self, items: &[T]) -> (&[T], PageInfo) {
        let p = self.normalized();
        let total = items.len() as u64;
        let last = total_pages(total, p.per_page);
        let page = p.page.min(last);
        let info = PageInfo::new(page, p.per_page, total);
        let start = ((page as u64 - 1) * p.per_page as u64).min(total) as usize;
        let end = ((page as u64) * p.per_page as u64).min(total) as usize;
        (&items[start..end], info)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// `max(1, ceil(total / per_page))`
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    let per_page = per_page.max(1) as u64;
    (total.div_ceil(per_page)).max(1) as u32
}

/// Page buttons to render: the first, the last, and everything within two of
/// `current`. `None` marks a gap between non-adjacent entries.
pub fn page_window(current: u32, total_pages: u32) -> Vec<Option<u32>> {
    let mut out = Vec::new();
    let mut prev: Option<u32> = None;
    for p in 1..=total_pages {
        if p == 1 || p == total_pages || current.abs_diff(p) <= 2 {
            if let Some(prev) = prev {
                if p - prev > 1 {
                    out.push(None);
                }
            }
            out.push(Some(p));
            prev = Some(p);
        }
    }
    out
}

/// What a pager renders: "Showing 26–50 of 112" plus the page buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
    /// 1-based index of the first row shown; 0 when there is nothing to show
    pub showing_from: u64,
    pub showing_to: u64,
    pub has_prev: bool,
    pub has_next: bool,
    pub window: Vec<Option<u32>>,
}

impl PageInfo {
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let pages = total_pages(total, per_page);
        let first = (page as u64 - 1) * per_page as u64 + 1;
        let showing_to = (page as u64 * per_page as u64).min(total);
        let showing_from = if total == 0 || first > total { 0 } else { first };
        Self {
            page,
            per_page,
            total,
            total_pages: pages,
            showing_from,
            showing_to,
            has_prev: page > 1,
            has_next: page < pages,
            window: page_window(page, pages),
        }
    }
}
