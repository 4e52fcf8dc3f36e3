use organizer_schema::completeness::Discrepancy;
use organizer_schema::{parse_response, FileClassificationResponse, Violation};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashSet;

fn record(file_id: &str) -> Value {
    json!({
        "file_id": file_id,
        "category": "Financial",
        "subcategory": "Invoices",
        "tags": ["invoice", "acme-corp"],
        "summary": "Invoice from Acme Corp for March",
        "confidence": 0.91,
        "suggested_folder": "Financial/Invoices"
    })
}

fn response(ids: &[&str]) -> FileClassificationResponse {
    let items: Vec<Value> = ids.iter().map(|id| record(id)).collect();
    parse_response(&json!({ "classifications": items })).unwrap()
}

fn ids(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn parses_and_preserves_order() {
    let parsed = response(&["b", "a", "c"]);
    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed.file_ids().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    assert!(parsed.get("a").is_some());
    assert!(parsed.get("z").is_none());
}

#[test]
fn unknown_root_fields_are_ignored() {
    let raw = json!({ "classifications": [record("a")], "model": "gpt-4o-mini" });
    let parsed = parse_response(&raw).unwrap();
    assert_eq!(parsed.file_ids().collect::<Vec<_>>(), vec!["a"]);
}

#[test]
fn empty_classifications_are_rejected() {
    let err = parse_response(&json!({ "classifications": [] })).unwrap_err();
    assert_eq!(err.issues()[0].violation, Violation::EmptyClassifications);
    assert_eq!(err.issues()[0].path, "classifications");
}

#[test]
fn missing_or_mistyped_root_is_structural() {
    let err = parse_response(&json!({})).unwrap_err();
    assert_eq!(err.issues()[0].violation, Violation::MissingField);

    let err = parse_response(&json!({ "classifications": "none" })).unwrap_err();
    assert_eq!(
        err.issues()[0].violation,
        Violation::WrongType {
            expected: "array",
            actual: "string"
        }
    );

    let err = parse_response(&json!(null)).unwrap_err();
    assert_eq!(err.issues()[0].path, "");
}

#[test]
fn reports_every_failing_element_with_position_and_id() {
    let mut second = record("doc-2");
    second["tags"] = json!(["Bad Tag", "fine"]);
    let mut third = record("doc-3");
    third["category"] = json!("Images");
    let raw = json!({ "classifications": [record("doc-1"), second, third] });

    let err = parse_response(&raw).unwrap_err();
    let located: Vec<(&str, Option<&str>)> = err
        .issues()
        .iter()
        .map(|i| (i.path.as_str(), i.file_id.as_deref()))
        .collect();
    assert_eq!(
        located,
        vec![
            ("classifications[1].tags[0]", Some("doc-2")),
            ("classifications[2].subcategory", Some("doc-3")),
        ]
    );
    assert!(err.to_string().contains("classifications[1].tags[0] (file_id 'doc-2')"));
}

#[test]
fn non_object_element_is_located() {
    let raw = json!({ "classifications": [record("a"), 7] });
    let err = parse_response(&raw).unwrap_err();
    assert_eq!(err.issues()[0].path, "classifications[1]");
    assert_eq!(err.issues()[0].file_id, None);
}

#[test]
fn completeness_reports_missing_only() {
    let parsed = response(&["a", "b"]);
    let messages = parsed.check_completeness(&ids(&["a", "b", "c"]));
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Missing"));
    assert!(messages[0].contains('c'));
    assert!(!messages[0].contains("Unexpected"));
}

#[test]
fn completeness_reports_missing_then_unexpected() {
    let parsed = response(&["a", "x", "y"]);
    let found = parsed.discrepancies(&ids(&["a", "b"]));
    assert_eq!(
        found,
        vec![
            Discrepancy::Missing(["b".to_string()].into_iter().collect()),
            Discrepancy::Unexpected(["x".to_string(), "y".to_string()].into_iter().collect()),
        ]
    );
    assert_eq!(
        parsed.check_completeness(&ids(&["a", "b"])),
        vec!["Missing file_ids: b", "Unexpected file_ids: x, y"]
    );
}

#[test]
fn completeness_of_matching_sets_is_empty() {
    let parsed = response(&["a", "b", "c"]);
    assert!(parsed.check_completeness(&ids(&["c", "b", "a"])).is_empty());
}

#[test]
fn duplicate_ids_count_once() {
    let parsed = response(&["a", "a"]);
    assert!(parsed.check_completeness(&ids(&["a"])).is_empty());
}

#[test]
fn response_round_trips() {
    let parsed = response(&["a", "b"]);
    assert_eq!(parse_response(&parsed.to_raw()).unwrap(), parsed);

    let text = serde_json::to_string(&parsed).unwrap();
    let again: FileClassificationResponse = serde_json::from_str(&text).unwrap();
    assert_eq!(again, parsed);
}

#[test]
fn issue_report_serializes_with_rule_and_class() {
    let mut bad = record("a");
    bad["confidence"] = json!(0.2);
    let err = parse_response(&json!({ "classifications": [bad] })).unwrap_err();
    let report = serde_json::to_value(&err).unwrap();
    assert_eq!(
        report,
        json!({
            "issues": [{
                "path": "classifications[0].confidence",
                "file_id": "a",
                "class": "format",
                "rule": "confidence_range",
                "message": "confidence must be between 0.50 and 0.98, got 0.2",
                "value": 0.2
            }]
        })
    );
}
