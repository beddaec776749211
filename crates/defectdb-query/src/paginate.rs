//! Page windowing with boundary clamping.

use serde::Serialize;

use defectdb_core::{Error, Result};

/// Counters for pagination controls, without the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_items: usize,
    /// Never zero: an empty result is one empty page.
    pub total_pages: usize,
    /// 1-based, already clamped into `1..=total_pages`.
    pub current_page: usize,
    pub page_size: usize,
}

impl PageInfo {
    pub fn has_previous(&self) -> bool { self.current_page > 1 }

    pub fn has_next(&self) -> bool { self.current_page < self.total_pages }

    fn offset(&self) -> usize { (self.current_page - 1) * self.page_size }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(flatten)]
    pub info: PageInfo,
}

impl<T> Page<T> {
    /// 1-based inclusive "showing a-b" window, `(0, 0)` when the page is empty.
    pub fn range(&self) -> (usize, usize) {
        if self.items.is_empty() {
            return (0, 0);
        }
        let start = self.info.offset() + 1;
        (start, start + self.items.len() - 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page { items: self.items.into_iter().map(f).collect(), info: self.info }
    }
}

/// Number of pages for `total_items`, at least 1.
pub fn page_count(total_items: usize, page_size: usize) -> Result<usize> {
    if page_size == 0 {
        return Err(Error::InvalidArgument("page size must be positive".into()));
    }
    Ok(total_items.div_ceil(page_size).max(1))
}

/// Slice page `page` (1-based) out of `items`. Out-of-range pages are clamped
/// to the nearest valid one; a zero `page_size` is a caller bug.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Result<Page<T>> {
    let total_pages = page_count(items.len(), page_size)?;
    let current_page = page.clamp(1, total_pages);
    let info = PageInfo { total_items: items.len(), total_pages, current_page, page_size };
    let start = info.offset().min(items.len());
    let end = (start + page_size).min(items.len());
    Ok(Page { items: items[start..end].to_vec(), info })
}
