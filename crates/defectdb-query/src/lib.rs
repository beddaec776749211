#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! defectdb-query
//!
//! Client-side query engine for the defect knowledge base: free-text and
//! exact-match filtering, stable three-state sorting and clamped pagination,
//! always composed as filter -> sort -> paginate.

pub mod engine;
pub mod filter;
pub mod observer;
pub mod paginate;
pub mod params;
pub mod sort;

pub use engine::{ListState, QueryEngine, QueryResult};
pub use filter::{filter, DefectQuery, TextTarget};
pub use observer::{NoopObserver, QueryObserver, TracingObserver};
pub use paginate::{page_count, paginate, Page, PageInfo};
pub use params::ListParams;
pub use sort::{sort, SortDirection, SortField, SortToggle};
