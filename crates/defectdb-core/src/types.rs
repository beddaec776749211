//! Domain types shared by the query engine and the record store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Opaque record identifier.
///
/// Fixtures carry either a JSON string or a JSON integer; both land here as
/// the string form so ids compare the same way regardless of source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DefectId(String);

impl DefectId {
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for DefectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for DefectId {
    fn from(value: &str) -> Self { Self(value.to_string()) }
}

impl<'de> Deserialize<'de> for DefectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Int(n) => Self(n.to_string()),
        })
    }
}

/// 4M root-cause taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefectCategory {
    Machine,
    Man,
    Method,
    Material,
}

impl DefectCategory {
    pub const ALL: [DefectCategory; 4] = [Self::Machine, Self::Man, Self::Method, Self::Material];

    /// Wire code, e.g. `MACHINE`.
    pub fn code(self) -> &'static str {
        match self {
            Self::Machine => "MACHINE",
            Self::Man => "MAN",
            Self::Method => "METHOD",
            Self::Material => "MATERIAL",
        }
    }

    /// Human label, e.g. `Machine`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Machine => "Machine",
            Self::Man => "Man",
            Self::Method => "Method",
            Self::Material => "Material",
        }
    }
}

impl fmt::Display for DefectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.code()) }
}

impl FromStr for DefectCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidArgument(format!("unknown category '{s}'")))
    }
}

/// Severity, declared from least to most important so the derived `Ord`
/// follows importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Self::Critical, Self::Major, Self::Minor];

    pub fn code(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Major => "MAJOR",
            Self::Minor => "MINOR",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Major => "Major",
            Self::Minor => "Minor",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.code()) }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidArgument(format!("unknown severity '{s}'")))
    }
}

/// Text fields a free-text fragment can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    FailureMode,
    Process,
    RootCause,
    CorrectiveAction,
    Criteria,
    Dri,
}

impl SearchField {
    /// Fields scanned by the general search box.
    pub const GENERAL: [SearchField; 4] =
        [Self::FailureMode, Self::Process, Self::RootCause, Self::CorrectiveAction];

    /// Logical name used in query strings.
    pub fn name(self) -> &'static str {
        match self {
            Self::FailureMode => "failureMode",
            Self::Process => "process",
            Self::RootCause => "rootCause",
            Self::CorrectiveAction => "correctiveAction",
            Self::Criteria => "criteria",
            Self::Dri => "dri",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [
            Self::FailureMode,
            Self::Process,
            Self::RootCause,
            Self::CorrectiveAction,
            Self::Criteria,
            Self::Dri,
        ]
        .into_iter()
        .find(|f| f.name() == name)
    }
}

/// One entry of the defect knowledge base.
///
/// Searched text fields default to the empty string when a fixture omits them,
/// list fields default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectRecord {
    pub id: DefectId,
    #[serde(default)]
    pub failure_mode: String,
    #[serde(default)]
    pub process: String,
    #[serde(default)]
    pub process_images: Vec<String>,
    #[serde(default)]
    pub criteria_acceptance_limit: String,
    #[serde(default)]
    pub dri: String,
    pub category: DefectCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub failure_analysis_root_cause: String,
    #[serde(default)]
    pub failure_analysis_images: Vec<String>,
    #[serde(default)]
    pub corrective_action: String,
    #[serde(default)]
    pub corrective_action_images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preventive_action: Option<String>,
    #[serde(default)]
    pub applicable_products: Vec<String>,
    #[serde(default)]
    pub applicable_processes: Vec<String>,
    #[serde(default)]
    pub related_defect_codes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool { true }

impl DefectRecord {
    pub fn text(&self, field: SearchField) -> &str {
        match field {
            SearchField::FailureMode => &self.failure_mode,
            SearchField::Process => &self.process,
            SearchField::RootCause => &self.failure_analysis_root_cause,
            SearchField::CorrectiveAction => &self.corrective_action,
            SearchField::Criteria => &self.criteria_acceptance_limit,
            SearchField::Dri => &self.dri,
        }
    }

    /// Every image reference, process images first.
    pub fn images(&self) -> impl Iterator<Item = &str> {
        self.process_images
            .iter()
            .chain(&self.failure_analysis_images)
            .chain(&self.corrective_action_images)
            .map(String::as_str)
    }
}
