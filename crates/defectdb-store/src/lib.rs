#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! defectdb-store
//!
//! The record store behind the query engine: JSON fixture loading, read-only
//! lookups and dashboard statistics, and a mock write path that simulates
//! save/delete latency without persisting anything.

pub mod draft;
pub mod fixture;
pub mod mock;
pub mod store;

pub use draft::DefectDraft;
pub use fixture::FixtureLoader;
pub use mock::MockRecordStore;
pub use store::{CategoryCount, DashboardStats, RecordStore};
