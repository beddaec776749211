mod common;

use common::{catalog, ids, record, wire_pair};
use defectdb_core::types::{DefectCategory, Severity};
use defectdb_query::{filter, sort, DefectQuery, SortDirection, SortField, SortToggle};

#[test]
fn item_matches_failure_mode_case_insensitively() {
    let records = wire_pair();
    let hits = filter(&records, &DefectQuery::new().text("item", "wire"));
    assert_eq!(ids(&hits), vec!["1", "2"]);
}

#[test]
fn exact_category_keeps_only_machine() {
    let records = wire_pair();
    let hits = filter(&records, &DefectQuery::new().category(DefectCategory::Machine));
    assert_eq!(ids(&hits), vec!["1"]);
}

#[test]
fn descending_failure_mode() {
    let records = wire_pair();
    let sorted = sort(&records, SortField::FailureMode, SortDirection::Desc);
    let modes: Vec<&str> = sorted.iter().map(|r| r.failure_mode.as_str()).collect();
    assert_eq!(modes, vec!["Wire Damage", "Exposed Wire"]);
}

#[test]
fn category_text_matches_code_or_process() {
    let records = catalog();
    let by_code = filter(&records, &DefectQuery::new().text("category", "meth"));
    assert_eq!(ids(&by_code), vec!["3", "5"]);
    let by_process = filter(&records, &DefectQuery::new().text("category", "endstrip"));
    assert_eq!(ids(&by_process), vec!["2", "6"]);
}

#[test]
fn general_search_spans_analysis_and_action() {
    let records = catalog();
    let hits = filter(&records, &DefectQuery::new().text("defect", "TEMPERATURE"));
    assert_eq!(ids(&hits), vec!["3"]);
    let hits = filter(&records, &DefectQuery::new().text("generalSearch", "solder"));
    assert_eq!(ids(&hits), vec!["3", "5"], "failure mode, process or action");
}

#[test]
fn field_specific_fragment_only_checks_its_field() {
    let records = catalog();
    let hits = filter(&records, &DefectQuery::new().text("dri", "yhel"));
    assert_eq!(ids(&hits), vec!["1"]);
    let none = filter(&records, &DefectQuery::new().text("dri", "laser"));
    assert!(none.is_empty());
}

#[test]
fn predicates_are_anded() {
    let records = catalog();
    let q = DefectQuery::new().text("category", "soldering").text("item", "bridge");
    assert_eq!(ids(&filter(&records, &q)), vec!["5"]);
}

#[test]
fn empty_query_returns_everything_in_order() {
    let records = catalog();
    let hits = filter(&records, &DefectQuery::new());
    assert_eq!(hits.len(), records.len());
    assert_eq!(ids(&hits), vec!["1", "2", "3", "4", "5", "6", "7"]);
}

#[test]
fn unknown_field_names_are_ignored() {
    let records = catalog();
    let mut q = DefectQuery::new();
    q.text_by_field.insert("colour".into(), "purple".into());
    assert_eq!(filter(&records, &q).len(), records.len());
}

#[test]
fn active_and_severity_filters() {
    let mut records = catalog();
    records[1].severity = Some(Severity::Critical);
    records[3].severity = Some(Severity::Minor);

    let inactive = filter(&records, &DefectQuery::new().active(false));
    assert_eq!(ids(&inactive), vec!["6"]);

    let critical = filter(&records, &DefectQuery::new().severity(Severity::Critical));
    assert_eq!(ids(&critical), vec!["2"], "records without severity never match");
}

#[test]
fn filter_is_idempotent() {
    let records = catalog();
    let q = DefectQuery::new().text("category", "process").active(true);
    let once = filter(&records, &q);
    let twice = filter(&once, &q);
    assert_eq!(ids(&once), ids(&twice));
}

#[test]
fn extra_predicate_never_grows_result() {
    let records = catalog();
    let base = DefectQuery::new().text("defect", "s");
    let narrower = base.clone().category(DefectCategory::Man);
    let narrowest = narrower.clone().text("item", "pin");
    let a = filter(&records, &base).len();
    let b = filter(&records, &narrower).len();
    let c = filter(&records, &narrowest).len();
    assert!(b <= a && c <= b, "{a} >= {b} >= {c}");
}

#[test]
fn sort_is_stable_for_ties_in_every_direction() {
    let records = catalog();
    for direction in [SortDirection::Asc, SortDirection::Desc, SortDirection::None] {
        let sorted = sort(&records, SortField::Process, direction);
        let soldering: Vec<String> = sorted
            .iter()
            .filter(|r| r.process == "Soldering Process")
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(soldering, vec!["3", "5"], "{direction}");
        let shell: Vec<String> = sorted
            .iter()
            .filter(|r| r.process == "Ground Shell Assembly")
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(shell, vec!["4", "7"], "{direction}");
    }
}

#[test]
fn three_clicks_restore_original_order() {
    let records = catalog();
    let original = ids(&sort(&records, SortField::Dri, SortDirection::None));
    let mut toggle = SortToggle::default();
    let mut orders = Vec::new();
    for _ in 0..3 {
        toggle.select(SortField::FailureMode);
        orders.push(ids(&sort(&records, SortField::FailureMode, toggle.direction())));
    }
    assert_eq!(orders[0], vec!["7", "3", "1", "6", "4", "5", "2"]);
    assert_eq!(orders[1], vec!["2", "5", "4", "6", "1", "3", "7"]);
    assert_eq!(orders[2], original);
}

#[test]
fn sort_does_not_touch_input() {
    let records = catalog();
    let before = records.clone();
    let _ = sort(&records, SortField::Category, SortDirection::Desc);
    assert_eq!(records, before);
}

#[test]
fn text_sort_ignores_case() {
    let records = vec![
        record("a", "beta", "MAN", ""),
        record("b", "Alpha", "MAN", ""),
        record("c", "alpha", "MAN", ""),
    ];
    let sorted = sort(&records, SortField::FailureMode, SortDirection::Asc);
    let modes: Vec<&str> = sorted.iter().map(|r| r.failure_mode.as_str()).collect();
    assert_eq!(modes, vec!["Alpha", "alpha", "beta"]);
}

#[test]
fn severity_sorts_by_importance() {
    let mut records = catalog();
    records[0].severity = Some(Severity::Minor);
    records[1].severity = Some(Severity::Critical);
    records[2].severity = Some(Severity::Major);
    let sorted = sort(&records[..4], SortField::Severity, SortDirection::Desc);
    assert_eq!(ids(&sorted), vec!["2", "3", "1", "4"], "missing severity last");
}

#[test]
fn repeated_queries_are_identical() {
    let records = catalog();
    let q = DefectQuery::new().text("defect", "o");
    let a = ids(&sort(&filter(&records, &q), SortField::Category, SortDirection::Asc));
    let b = ids(&sort(&filter(&records, &q), SortField::Category, SortDirection::Asc));
    assert_eq!(a, b);
}
