use crate::paginate::PageInfo;
use crate::sort::{SortDirection, SortField};

/// Diagnostic hook fired at each pipeline stage. All methods default to no-ops.
pub trait QueryObserver: Send + Sync {
    fn on_filtered(&self, _total: usize, _matched: usize) {}
    fn on_sorted(&self, _field: Option<SortField>, _direction: SortDirection) {}
    fn on_paginated(&self, _info: &PageInfo) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl QueryObserver for NoopObserver {}

/// Emits each stage as a `tracing` debug event under the `defectdb::query` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl QueryObserver for TracingObserver {
    fn on_filtered(&self, total: usize, matched: usize) {
        tracing::debug!(target: "defectdb::query", total, matched, "filtered");
    }

    fn on_sorted(&self, field: Option<SortField>, direction: SortDirection) {
        let field = field.map_or("-", SortField::name);
        tracing::debug!(target: "defectdb::query", field, direction = %direction, "sorted");
    }

    fn on_paginated(&self, info: &PageInfo) {
        tracing::debug!(
            target: "defectdb::query",
            page = info.current_page,
            total_pages = info.total_pages,
            page_size = info.page_size,
            total_items = info.total_items,
            "paginated"
        );
    }
}
