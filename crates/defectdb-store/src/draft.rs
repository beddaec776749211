use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use defectdb_core::types::{DefectCategory, DefectId, DefectRecord, Severity};
use defectdb_core::{Error, FieldError, Result};

/// Add/edit form contents: a record without identity or audit fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectDraft {
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
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub failure_analysis_root_cause: String,
    #[serde(default)]
    pub failure_analysis_images: Vec<String>,
    #[serde(default)]
    pub corrective_action: String,
    #[serde(default)]
    pub corrective_action_images: Vec<String>,
    #[serde(default)]
    pub preventive_action: Option<String>,
    #[serde(default)]
    pub applicable_products: Vec<String>,
    #[serde(default)]
    pub applicable_processes: Vec<String>,
    #[serde(default)]
    pub related_defect_codes: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool { true }

impl DefectDraft {
    /// An empty form, as the add page starts out.
    pub fn new(category: DefectCategory) -> Self {
        Self {
            failure_mode: String::new(),
            process: String::new(),
            process_images: vec![],
            criteria_acceptance_limit: String::new(),
            dri: String::new(),
            category,
            severity: None,
            failure_analysis_root_cause: String::new(),
            failure_analysis_images: vec![],
            corrective_action: String::new(),
            corrective_action_images: vec![],
            preventive_action: None,
            applicable_products: vec![],
            applicable_processes: vec![],
            related_defect_codes: vec![],
            is_active: true,
        }
    }

    /// Every required field that is blank, in form order.
    pub fn field_errors(&self) -> Vec<FieldError> {
        let required = [
            ("failureMode", &self.failure_mode, "Failure mode is required"),
            ("process", &self.process, "Process is required"),
            (
                "failureAnalysisRootCause",
                &self.failure_analysis_root_cause,
                "Failure analysis / root cause is required",
            ),
            ("correctiveAction", &self.corrective_action, "Corrective action is required"),
        ];
        required
            .into_iter()
            .filter(|(_, value, _)| value.trim().is_empty())
            .map(|(field, _, message)| FieldError { field, message: message.to_string() })
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        let errors = self.field_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }

    /// Materialise a full record. Edits replace the whole record, so the caller
    /// passes the audit fields it wants to keep.
    pub(crate) fn into_record(
        self,
        id: DefectId,
        created_at: DateTime<Utc>,
        created_by: String,
        updated_at: DateTime<Utc>,
        updated_by: Option<String>,
    ) -> DefectRecord {
        DefectRecord {
            id,
            failure_mode: self.failure_mode,
            process: self.process,
            process_images: self.process_images,
            criteria_acceptance_limit: self.criteria_acceptance_limit,
            dri: self.dri,
            category: self.category,
            severity: self.severity,
            failure_analysis_root_cause: self.failure_analysis_root_cause,
            failure_analysis_images: self.failure_analysis_images,
            corrective_action: self.corrective_action,
            corrective_action_images: self.corrective_action_images,
            preventive_action: self.preventive_action.filter(|s| !s.trim().is_empty()),
            applicable_products: self.applicable_products,
            applicable_processes: self.applicable_processes,
            related_defect_codes: self.related_defect_codes,
            created_at,
            updated_at,
            created_by,
            updated_by,
            is_active: self.is_active,
        }
    }
}

/// Pre-fill for the edit form.
impl From<&DefectRecord> for DefectDraft {
    fn from(r: &DefectRecord) -> Self {
        Self {
            failure_mode: r.failure_mode.clone(),
            process: r.process.clone(),
            process_images: r.process_images.clone(),
            criteria_acceptance_limit: r.criteria_acceptance_limit.clone(),
            dri: r.dri.clone(),
            category: r.category,
            severity: r.severity,
            failure_analysis_root_cause: r.failure_analysis_root_cause.clone(),
            failure_analysis_images: r.failure_analysis_images.clone(),
            corrective_action: r.corrective_action.clone(),
            corrective_action_images: r.corrective_action_images.clone(),
            preventive_action: r.preventive_action.clone(),
            applicable_products: r.applicable_products.clone(),
            applicable_processes: r.applicable_processes.clone(),
            related_defect_codes: r.related_defect_codes.clone(),
            is_active: r.is_active,
        }
    }
}
