#![allow(dead_code)]

use defectdb_core::types::{DefectCategory, DefectRecord};

pub fn record(id: &str, failure_mode: &str, category: &str, process: &str) -> DefectRecord {
    let category = category.parse::<DefectCategory>().expect("category");
    serde_json::from_value(serde_json::json!({
        "id": id,
        "failureMode": failure_mode,
        "process": process,
        "category": category,
        "createdAt": "2024-01-15T08:30:00Z",
        "updatedAt": "2024-01-15T08:30:00Z",
        "createdBy": "fixture",
    }))
    .expect("record")
}

/// The two records used throughout the worked examples.
pub fn wire_pair() -> Vec<DefectRecord> {
    vec![
        record("1", "Exposed Wire", "MACHINE", "Laser Marking"),
        record("2", "Wire Damage", "MATERIAL", "Cutting"),
    ]
}

pub fn catalog() -> Vec<DefectRecord> {
    let mut records = vec![
        record("1", "Exposed Wire", "MACHINE", "AL-Pet Laser Marking and Manual AL-Pet removal"),
        record("2", "Wire Damage", "MATERIAL", "Lowside Endstrip Process"),
        record("3", "Cold Solder Joint", "METHOD", "Soldering Process"),
        record("4", "Missing Shell", "MAN", "Ground Shell Assembly"),
        record("5", "Solder Bridge", "METHOD", "Soldering Process"),
        record("6", "Insulation Nick", "MACHINE", "Lowside Endstrip Process"),
        record("7", "Bent Pin", "MAN", "Ground Shell Assembly"),
    ];
    records[0].dri = "Yhel".into();
    records[0].failure_analysis_root_cause = "Laser power drifted above spec".into();
    records[0].corrective_action = "Recalibrate laser".into();
    records[2].failure_analysis_root_cause = "Iron tip temperature too low".into();
    records[2].corrective_action = "Verify tip temperature every shift".into();
    records[4].corrective_action = "Retrain operators on solder volume".into();
    records[5].is_active = false;
    records
}

pub fn ids(records: &[&DefectRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.to_string()).collect()
}

pub fn owned_ids(records: &[DefectRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.to_string()).collect()
}
