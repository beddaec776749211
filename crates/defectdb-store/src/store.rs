use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use defectdb_core::traits::RecordSource;
use defectdb_core::types::{DefectCategory, DefectId, DefectRecord, Severity};
use defectdb_core::{Error, Result};

const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: DefectCategory,
    pub label: &'static str,
    pub count: usize,
}

/// Headline numbers for the dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
    pub critical: usize,
    /// All four 4M categories, in taxonomy order, zero counts included.
    pub by_category: Vec<CategoryCount>,
    /// Most recently updated first.
    pub recent: Vec<DefectRecord>,
}

/// Read-only view over one snapshot of the collection. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Arc<[DefectRecord]>,
}

impl RecordStore {
    pub fn new(records: impl Into<Arc<[DefectRecord]>>) -> Self { Self { records: records.into() } }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn records(&self) -> &[DefectRecord] { &self.records }

    pub fn get(&self, id: &DefectId) -> Result<&DefectRecord> {
        self.records
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| Error::NotFound(format!("defect '{id}'")))
    }

    /// Categories in use, first-seen order.
    pub fn categories(&self) -> Vec<DefectCategory> { distinct(self.records.iter().map(|r| r.category)) }

    pub fn failure_modes(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.failure_mode.clone()))
    }

    pub fn processes(&self) -> Vec<String> { distinct(self.records.iter().map(|r| r.process.clone())) }

    pub fn stats(&self) -> DashboardStats {
        let by_category = DefectCategory::ALL
            .into_iter()
            .map(|category| CategoryCount {
                category,
                label: category.label(),
                count: self.records.iter().filter(|r| r.category == category).count(),
            })
            .collect();

        let mut recent: Vec<&DefectRecord> = self.records.iter().collect();
        recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        DashboardStats {
            total: self.records.len(),
            active: self.records.iter().filter(|r| r.is_active).count(),
            critical: self.records.iter().filter(|r| r.severity == Some(Severity::Critical)).count(),
            by_category,
            recent: recent.into_iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }
}

impl RecordSource for RecordStore {
    fn snapshot(&self) -> Arc<[DefectRecord]> { Arc::clone(&self.records) }
}

fn distinct<T: Eq + std::hash::Hash + Clone>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(item.clone())).collect()
}
