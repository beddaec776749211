//! Prototype write path. Mutations wait out a configured latency, then swap
//! in a new snapshot; nothing is persisted and nothing is retried.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::Utc;

use defectdb_core::config::StoreSettings;
use defectdb_core::traits::RecordSource;
use defectdb_core::types::{DefectId, DefectRecord};
use defectdb_core::{Error, Result};

use crate::draft::DefectDraft;
use crate::store::RecordStore;

pub struct MockRecordStore {
    current: RwLock<RecordStore>,
    save_latency: Duration,
    delete_latency: Duration,
    /// Highest numeric id handed out, so deleted ids are never reissued.
    high_water: AtomicU64,
}

impl MockRecordStore {
    pub fn new(records: Vec<DefectRecord>, settings: &StoreSettings) -> Self {
        let high_water = records.iter().filter_map(|r| r.id.as_str().parse::<u64>().ok()).max().unwrap_or(0);
        Self {
            current: RwLock::new(RecordStore::new(records)),
            save_latency: Duration::from_millis(settings.save_latency_ms),
            delete_latency: Duration::from_millis(settings.delete_latency_ms),
            high_water: AtomicU64::new(high_water),
        }
    }

    /// The snapshot queries should read right now.
    pub fn current(&self) -> RecordStore { self.current.read().unwrap_or_else(PoisonError::into_inner).clone() }

    pub async fn create(&self, draft: DefectDraft, author: &str) -> Result<DefectRecord> {
        draft.validate()?;
        tokio::time::sleep(self.save_latency).await;

        let previous = self
            .high_water
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map_err(|n| Error::InvalidArgument(format!("no defect id left after {n}")))?;
        let id = DefectId::new((previous + 1).to_string());
        let now = Utc::now();
        let record = draft.into_record(id, now, author.to_string(), now, None);
        self.replace_with(|records| {
            records.push(record.clone());
            Ok(())
        })?;
        tracing::info!(id = %record.id, author, "defect created");
        Ok(record)
    }

    /// Full replace: everything but `id`, `created_at` and `created_by` comes
    /// from the draft.
    pub async fn update(&self, id: &DefectId, draft: DefectDraft, editor: &str) -> Result<DefectRecord> {
        draft.validate()?;
        tokio::time::sleep(self.save_latency).await;

        let mut updated = None;
        self.replace_with(|records| {
            let slot = records
                .iter_mut()
                .find(|r| &r.id == id)
                .ok_or_else(|| Error::NotFound(format!("defect '{id}'")))?;
            let record = draft.into_record(
                slot.id.clone(),
                slot.created_at,
                slot.created_by.clone(),
                Utc::now(),
                Some(editor.to_string()),
            );
            *slot = record.clone();
            updated = Some(record);
            Ok(())
        })?;
        tracing::info!(%id, editor, "defect updated");
        updated.ok_or_else(|| Error::NotFound(format!("defect '{id}'")))
    }

    pub async fn delete(&self, id: &DefectId) -> Result<()> {
        tokio::time::sleep(self.delete_latency).await;
        self.replace_with(|records| {
            let before = records.len();
            records.retain(|r| &r.id != id);
            if records.len() == before {
                return Err(Error::NotFound(format!("defect '{id}'")));
            }
            Ok(())
        })?;
        tracing::info!(%id, "defect deleted");
        Ok(())
    }

    /// Copy-on-write: readers holding the old snapshot are unaffected.
    fn replace_with(&self, edit: impl FnOnce(&mut Vec<DefectRecord>) -> Result<()>) -> Result<()> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut records = guard.records().to_vec();
        edit(&mut records)?;
        *guard = RecordStore::new(records);
        Ok(())
    }
}

impl RecordSource for MockRecordStore {
    fn snapshot(&self) -> Arc<[DefectRecord]> { self.current().snapshot() }
}
