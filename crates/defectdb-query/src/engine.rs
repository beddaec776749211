//! The filter -> sort -> paginate pipeline and the caller-side list state.

use serde::Serialize;

use defectdb_core::traits::RecordSource;
use defectdb_core::types::{DefectCategory, DefectRecord, Severity};
use defectdb_core::{Error, Result};

use crate::filter::{filter, DefectQuery};
use crate::observer::{QueryObserver, TracingObserver};
use crate::paginate::{paginate, Page};
use crate::sort::{sort_in_place, SortDirection, SortField, SortToggle};

/// List-page state. Any change to filters, sort or page size moves back to
/// page 1 so a stale page number never outlives the result set it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    query: DefectQuery,
    sort: SortToggle,
    page: usize,
    page_size: usize,
}

impl ListState {
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidArgument("page size must be positive".into()));
        }
        Ok(Self { query: DefectQuery::default(), sort: SortToggle::default(), page: 1, page_size })
    }

    pub fn query(&self) -> &DefectQuery { &self.query }

    pub fn sort(&self) -> SortToggle { self.sort }

    pub fn page(&self) -> usize { self.page }

    pub fn page_size(&self) -> usize { self.page_size }

    pub fn set_query(&mut self, query: DefectQuery) {
        self.query = query;
        self.page = 1;
    }

    pub fn set_text(&mut self, field: &str, fragment: &str) {
        self.query.set_text(field, fragment);
        self.page = 1;
    }

    pub fn set_category(&mut self, category: Option<DefectCategory>) {
        self.query.category = category;
        self.page = 1;
    }

    pub fn set_severity(&mut self, severity: Option<Severity>) {
        self.query.severity = severity;
        self.page = 1;
    }

    pub fn set_active(&mut self, is_active: Option<bool>) {
        self.query.is_active = is_active;
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.query = DefectQuery::default();
        self.page = 1;
    }

    /// Column-header click.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort.select(field);
        self.page = 1;
    }

    pub fn set_sort(&mut self, field: Option<SortField>, direction: SortDirection) {
        self.sort = SortToggle::new(field, direction);
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(Error::InvalidArgument("page size must be positive".into()));
        }
        self.page_size = page_size;
        self.page = 1;
        Ok(())
    }

    /// Stored as given; the engine clamps when it runs.
    pub fn goto_page(&mut self, page: usize) { self.page = page; }
}

/// One rendered list page plus the counts the summary line needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(flatten)]
    pub page: Page<DefectRecord>,
    /// Size of the whole collection before filtering.
    pub collection_total: usize,
    pub filtered: bool,
}

impl QueryResult {
    pub fn matched_total(&self) -> usize { self.page.info.total_items }

    pub fn is_empty(&self) -> bool { self.page.info.total_items == 0 }

    /// e.g. `Showing 4 of 7 defects (filtered)`.
    pub fn summary(&self) -> String {
        let mut line = format!("Showing {} of {} defects", self.matched_total(), self.collection_total);
        if self.filtered {
            line.push_str(" (filtered)");
        }
        line
    }

    /// Placeholder shown in place of the table when nothing matched.
    pub fn empty_state(&self) -> Option<&'static str> {
        self.is_empty().then_some("No defects found matching your criteria")
    }
}

/// Stateless pipeline; every call reads a fresh snapshot.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine<O = TracingObserver> {
    observer: O,
}

impl QueryEngine<TracingObserver> {
    pub fn new() -> Self { Self { observer: TracingObserver } }
}

impl<O: QueryObserver> QueryEngine<O> {
    pub fn with_observer(observer: O) -> Self { Self { observer } }

    pub fn observer(&self) -> &O { &self.observer }

    pub fn run<S: RecordSource + ?Sized>(&self, source: &S, state: &ListState) -> Result<QueryResult> {
        let snapshot = source.snapshot();
        self.execute(&snapshot, state.query(), state.sort(), state.page(), state.page_size())
    }

    /// Filter, then sort, then paginate. The order is fixed.
    pub fn execute(
        &self,
        records: &[DefectRecord],
        query: &DefectQuery,
        sort_state: SortToggle,
        page: usize,
        page_size: usize,
    ) -> Result<QueryResult> {
        let matched = filter(records, query);
        self.observer.on_filtered(records.len(), matched.len());

        let mut ordered = matched;
        if let Some((field, direction)) = sort_state.active() {
            sort_in_place(&mut ordered, field, direction);
        }
        self.observer.on_sorted(sort_state.field(), sort_state.direction());

        let page = paginate(&ordered, page, page_size)?.map(|r| r.clone());
        self.observer.on_paginated(&page.info);

        Ok(QueryResult { page, collection_total: records.len(), filtered: query.has_active_filters() })
    }
}
