//! Stable three-state sorting.

use std::borrow::Borrow;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use unicode_normalization::UnicodeNormalization;

use defectdb_core::types::{DefectRecord, Severity};
use defectdb_core::Error;

/// Sortable columns. Anything else is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    FailureMode,
    Process,
    Category,
    Dri,
    Criteria,
    Severity,
    UpdatedAt,
}

impl SortField {
    pub const ALL: [SortField; 7] = [
        Self::FailureMode,
        Self::Process,
        Self::Category,
        Self::Dri,
        Self::Criteria,
        Self::Severity,
        Self::UpdatedAt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::FailureMode => "failureMode",
            Self::Process => "process",
            Self::Category => "category",
            Self::Dri => "dri",
            Self::Criteria => "criteriaAcceptanceLimit",
            Self::Severity => "severity",
            Self::UpdatedAt => "updatedAt",
        }
    }

    fn key(self, record: &DefectRecord) -> SortKey {
        match self {
            Self::FailureMode => SortKey::text(&record.failure_mode),
            Self::Process => SortKey::text(&record.process),
            Self::Category => SortKey::text(record.category.code()),
            Self::Dri => SortKey::text(&record.dri),
            Self::Criteria => SortKey::text(&record.criteria_acceptance_limit),
            Self::Severity => SortKey::Severity(record.severity),
            Self::UpdatedAt => SortKey::Time(record.updated_at),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("'{s}' is not a sortable field")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    Asc,
    Desc,
    #[default]
    None,
}

impl SortDirection {
    /// Column-header toggle: asc -> desc -> none -> asc.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::None,
            Self::None => Self::Asc,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
            Self::None => "none",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            "" | "none" => Ok(Self::None),
            _ => Err(Error::InvalidArgument(format!("unknown sort direction '{s}'"))),
        }
    }
}

/// Per-record sort key. A single sort only ever compares one variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    /// (folded, raw): folded decides, raw breaks case/width ties.
    Text(String, String),
    Severity(Option<Severity>),
    Time(DateTime<Utc>),
}

impl SortKey {
    fn text(s: &str) -> Self { Self::Text(collation_key(s), s.to_string()) }
}

/// NFKC + lowercase, so `Ｗire`, `WIRE` and `wire` sort together.
pub fn collation_key(s: &str) -> String { s.nfkc().collect::<String>().to_lowercase() }

/// Stable sort by `field`. `SortDirection::None` keeps input order, and equal
/// keys keep input order in every direction.
pub fn sort<'a, R: Borrow<DefectRecord>>(
    records: &'a [R],
    field: SortField,
    direction: SortDirection,
) -> Vec<&'a DefectRecord> {
    let mut out: Vec<&DefectRecord> = records.iter().map(Borrow::borrow).collect();
    sort_in_place(&mut out, field, direction);
    out
}

pub(crate) fn sort_in_place(records: &mut [&DefectRecord], field: SortField, direction: SortDirection) {
    match direction {
        SortDirection::None => {}
        SortDirection::Asc => records.sort_by_cached_key(|r| field.key(r)),
        SortDirection::Desc => records.sort_by_cached_key(|r| Reverse(field.key(r))),
    }
}

/// Caller-side sort state driven by column-header clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortToggle {
    field: Option<SortField>,
    direction: SortDirection,
}

impl SortToggle {
    pub fn new(field: Option<SortField>, direction: SortDirection) -> Self {
        match field {
            Some(_) => Self { field, direction },
            None => Self::default(),
        }
    }

    /// Same field cycles asc -> desc -> none; a different field starts at asc.
    pub fn select(&mut self, field: SortField) {
        if self.field == Some(field) {
            self.direction = self.direction.next();
        } else {
            self.field = Some(field);
            self.direction = SortDirection::Asc;
        }
    }

    pub fn field(&self) -> Option<SortField> { self.field }

    pub fn direction(&self) -> SortDirection { self.direction }

    /// The field to sort by, or `None` when unsorted.
    pub fn active(&self) -> Option<(SortField, SortDirection)> {
        match (self.field, self.direction) {
            (Some(f), d) if d != SortDirection::None => Some((f, d)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycles_three_states() {
        let mut t = SortToggle::default();
        t.select(SortField::Process);
        assert_eq!(t.active(), Some((SortField::Process, SortDirection::Asc)));
        t.select(SortField::Process);
        assert_eq!(t.active(), Some((SortField::Process, SortDirection::Desc)));
        t.select(SortField::Process);
        assert_eq!(t.active(), None);
        t.select(SortField::Process);
        assert_eq!(t.active(), Some((SortField::Process, SortDirection::Asc)));
    }

    #[test]
    fn switching_field_restarts_at_asc() {
        let mut t = SortToggle::default();
        t.select(SortField::Dri);
        t.select(SortField::Dri);
        t.select(SortField::Category);
        assert_eq!(t.active(), Some((SortField::Category, SortDirection::Asc)));
    }

    #[test]
    fn unknown_field_is_invalid_argument() {
        assert!(matches!("images".parse::<SortField>(), Err(Error::InvalidArgument(_))));
        assert_eq!("criteriaAcceptanceLimit".parse::<SortField>().unwrap(), SortField::Criteria);
    }

    #[test]
    fn collation_folds_case_and_width() {
        assert_eq!(collation_key("ＷIRE"), "wire");
    }
}
