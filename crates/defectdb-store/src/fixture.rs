use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use defectdb_core::types::DefectRecord;
use defectdb_core::{Error, Result};

/// Loads defect fixtures: a JSON array per file, either one file or every
/// `*.json` under a directory.
#[derive(Debug, Default)]
pub struct FixtureLoader;

impl FixtureLoader {
    pub fn new() -> Self { Self }

    pub fn load(&self, path: &Path) -> Result<Vec<DefectRecord>> {
        if path.is_dir() {
            self.load_directory(path)
        } else {
            self.load_file(path)
        }
    }

    /// Files are read in path order so ids and ordering are reproducible.
    pub fn load_directory(&self, dir: &Path) -> Result<Vec<DefectRecord>> {
        let files = self.list_json_files(dir);
        if files.is_empty() {
            tracing::warn!(dir = %dir.display(), "no .json fixtures found");
            return Ok(vec![]);
        }
        let mut all = Vec::new();
        for (i, file) in files.iter().enumerate() {
            tracing::debug!(file = %file.display(), "loading fixture {}/{}", i + 1, files.len());
            all.extend(self.read_records(file)?);
        }
        ensure_unique_ids(&all)?;
        tracing::info!(files = files.len(), records = all.len(), "loaded defect fixtures");
        Ok(all)
    }

    pub fn load_file(&self, file: &Path) -> Result<Vec<DefectRecord>> {
        let records = self.read_records(file)?;
        ensure_unique_ids(&records)?;
        tracing::info!(file = %file.display(), records = records.len(), "loaded defect fixture");
        Ok(records)
    }

    pub fn parse(&self, json: &str) -> Result<Vec<DefectRecord>> {
        let records: Vec<DefectRecord> =
            serde_json::from_str(json).map_err(|e| Error::Fixture(format!("invalid fixture JSON: {e}")))?;
        ensure_unique_ids(&records)?;
        Ok(records)
    }

    fn read_records(&self, file: &Path) -> Result<Vec<DefectRecord>> {
        let content = fs::read_to_string(file)
            .map_err(|e| Error::Fixture(format!("cannot read {}: {e}", file.display())))?;
        serde_json::from_str(&content).map_err(|e| Error::Fixture(format!("{}: {e}", file.display())))
    }

    fn list_json_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect();
        files.sort();
        files
    }
}

fn ensure_unique_ids(records: &[DefectRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for r in records {
        if !seen.insert(&r.id) {
            return Err(Error::Fixture(format!("duplicate defect id '{}'", r.id)));
        }
    }
    Ok(())
}
