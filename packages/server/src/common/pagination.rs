//! Offset pagination for list endpoints.
//!
//! List endpoints report the total row count alongside the page, so pagination
//! is page/limit based rather than cursor based.
//!
//! ```rust,ignore
//! let args = PageArgs { page: Some(2), limit: Some(20) }.validate();
//! let (items, total) = Match::find_for_user(user_id, &filter, &args, pool).await?;
//! let page = Page::new(items, total, &args);
//! ```

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Raw `page`/`limit` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageArgs {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageArgs {
    /// Applies defaults (page 1, limit 10) and bounds (limit 1-100).
    pub fn validate(&self) -> ValidatedPageArgs {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        ValidatedPageArgs { page, limit }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedPageArgs {
    /// 1-based page number.
    pub page: i64,
    pub limit: i64,
}

impl ValidatedPageArgs {
    /// SQL OFFSET for this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// One page of results plus the total count ignoring pagination.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, args: &ValidatedPageArgs) -> Self {
        let pages = if total == 0 {
            0
        } else {
            (total + args.limit - 1) / args.limit
        };
        Self {
            items,
            total,
            page: args.page,
            limit: args.limit,
            pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            pages: self.pages,
        }
    }
}
