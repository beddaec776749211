//! Free-text and exact-match filtering over a record snapshot.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use defectdb_core::types::{DefectCategory, DefectRecord, SearchField, Severity};

/// What a named text fragment is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTarget {
    /// Failure mode only (the "item" box).
    Item,
    /// Category code OR process.
    CategoryOrProcess,
    /// Any of [`SearchField::GENERAL`].
    General,
    Field(SearchField),
}

impl TextTarget {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "item" => Some(Self::Item),
            "category" => Some(Self::CategoryOrProcess),
            "defect" | "generalSearch" | "q" => Some(Self::General),
            other => SearchField::from_name(other).map(Self::Field),
        }
    }

    fn matches(self, record: &DefectRecord, needle: &str) -> bool {
        match self {
            Self::Item => contains(record.text(SearchField::FailureMode), needle),
            Self::CategoryOrProcess => {
                contains(record.category.code(), needle) || contains(&record.process, needle)
            }
            Self::General => SearchField::GENERAL.iter().any(|f| contains(record.text(*f), needle)),
            Self::Field(field) => contains(record.text(field), needle),
        }
    }
}

fn contains(haystack: &str, needle: &str) -> bool { haystack.to_lowercase().contains(needle) }

/// Filter configuration. Every field is optional and an absent or empty one
/// imposes no constraint; the supplied ones are ANDed. Whitespace is a real
/// fragment and is matched as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefectQuery {
    /// Logical field name to fragment. Unrecognised names are ignored.
    pub text_by_field: BTreeMap<String, String>,
    pub category: Option<DefectCategory>,
    pub severity: Option<Severity>,
    pub is_active: Option<bool>,
}

impl DefectQuery {
    pub fn new() -> Self { Self::default() }

    pub fn text(mut self, field: impl Into<String>, fragment: impl Into<String>) -> Self {
        self.set_text(field, fragment);
        self
    }

    pub fn category(mut self, category: DefectCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Set or clear (on empty input) a text fragment.
    pub fn set_text(&mut self, field: impl Into<String>, fragment: impl Into<String>) {
        let field = field.into();
        let fragment = fragment.into();
        if fragment.is_empty() {
            self.text_by_field.remove(&field);
        } else {
            self.text_by_field.insert(field, fragment);
        }
    }

    /// True when any constraint would narrow the collection.
    pub fn has_active_filters(&self) -> bool {
        self.active_text().next().is_some()
            || self.category.is_some()
            || self.severity.is_some()
            || self.is_active.is_some()
    }

    fn active_text(&self) -> impl Iterator<Item = (TextTarget, String)> + '_ {
        self.text_by_field.iter().filter_map(|(name, fragment)| {
            if fragment.is_empty() {
                return None;
            }
            TextTarget::from_name(name).map(|t| (t, fragment.to_lowercase()))
        })
    }

    pub fn matches(&self, record: &DefectRecord) -> bool {
        if self.category.is_some_and(|c| c != record.category) {
            return false;
        }
        if let Some(severity) = self.severity {
            if record.severity != Some(severity) {
                return false;
            }
        }
        if self.is_active.is_some_and(|a| a != record.is_active) {
            return false;
        }
        self.active_text().all(|(target, needle)| target.matches(record, &needle))
    }
}

/// Records matching `query`, in input order.
pub fn filter<'a, R: Borrow<DefectRecord>>(records: &'a [R], query: &DefectQuery) -> Vec<&'a DefectRecord> {
    records.iter().map(Borrow::borrow).filter(|r| query.matches(r)).collect()
}
