use std::sync::Arc;

use crate::types::DefectRecord;

/// Supplies the full collection as an immutable snapshot.
///
/// Writers swap in a new `Arc` rather than mutating, so a snapshot taken for a
/// query stays valid for the whole filter/sort/paginate pass.
pub trait RecordSource: Send + Sync {
    fn snapshot(&self) -> Arc<[DefectRecord]>;
}

impl RecordSource for Arc<[DefectRecord]> {
    fn snapshot(&self) -> Arc<[DefectRecord]> { Arc::clone(self) }
}

impl RecordSource for Vec<DefectRecord> {
    fn snapshot(&self) -> Arc<[DefectRecord]> { Arc::from(self.as_slice()) }
}
