//! Page/pageSize clamping and the paginated response envelope.

use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Clamp: page >= 1, page_size in [1, MAX_PAGE_SIZE]. `None` picks the default.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Pagination {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Lenient parse of raw query values; anything non-numeric falls back to the default.
    pub fn from_raw(page: Option<&str>, page_size: Option<&str>) -> Self {
        let parse = |s: Option<&str>| s.and_then(|v| v.trim().parse::<i64>().ok());
        Self::new(parse(page), parse(page_size))
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// ceil(total / page_size); 0 when total is 0.
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        (total + self.page_size - 1) / self.page_size
    }

    pub fn wrap<T>(&self, total: i64, items: Vec<T>) -> Page<T> {
        Page {
            total,
            total_pages: self.total_pages(total),
            page: self.page,
            page_size: self.page_size,
            items,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total: i64,
    pub total_pages: i64,
    pub page: i64,
    pub page_size: i64,
    pub items: Vec<T>,
}
