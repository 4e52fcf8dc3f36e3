use organizer_schema::config::{ExtractionConfig, FeedbackConfig};
use organizer_schema::extract::{extract_json, parse_model_output};
use organizer_schema::feedback::{corrective_feedback, feedback_for_error};
use organizer_schema::ParseError;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

const PAYLOAD: &str = r#"{"classifications": [{
    "file_id": "17",
    "category": "Code",
    "subcategory": "Scripts",
    "tags": ["python", "automation"],
    "summary": "Script that renames downloaded invoices",
    "confidence": 0.8,
    "suggested_folder": "Code/Scripts"
}]}"#;

#[test]
fn extracts_from_json_fence() {
    let text = format!("Here you go:\n```json\n{PAYLOAD}\n```\nLet me know.");
    assert_eq!(extract_json(&text), PAYLOAD);
}

#[test]
fn extracts_from_bare_fence() {
    let text = format!("```\n{PAYLOAD}\n```");
    assert_eq!(extract_json(&text), PAYLOAD);
}

#[test]
fn plain_text_is_trimmed() {
    assert_eq!(extract_json("  {\"a\": 1}\n"), "{\"a\": 1}");
}

#[test]
fn parses_fenced_model_output() {
    let text = format!("```json\n{PAYLOAD}\n```");
    let parsed = parse_model_output(&text, &ExtractionConfig::default()).unwrap();
    assert_eq!(parsed.classifications()[0].file_id(), "17");
}

#[test]
fn fences_are_json_errors_when_stripping_is_off() {
    let text = format!("```json\n{PAYLOAD}\n```");
    let config = ExtractionConfig {
        strip_code_fences: false,
    };
    let err = parse_model_output(&text, &config).unwrap_err();
    assert!(matches!(err, ParseError::Json(_)));

    let feedback = feedback_for_error(&err, &FeedbackConfig::default());
    assert!(feedback.contains("not valid JSON"));
}

#[test]
fn no_feedback_when_nothing_is_wrong() {
    let parsed = parse_model_output(PAYLOAD, &ExtractionConfig::default()).unwrap();
    let expected: HashSet<String> = ["17".to_string()].into_iter().collect();
    let discrepancies = parsed.discrepancies(&expected);
    assert_eq!(
        corrective_feedback(&[], &discrepancies, &FeedbackConfig::default()),
        None
    );
}

#[test]
fn feedback_lists_issues_hints_and_discrepancies() {
    let text = PAYLOAD.replace("\"Code\"", "\"Legal\"").replace("Scripts\"", "Photos\"");
    let text = text.replace("Code/Photos", "Legal/Photos");
    let err = parse_model_output(&text, &ExtractionConfig::default()).unwrap_err();
    let ParseError::Invalid(invalid) = &err else {
        panic!("expected validation failure, got {err}");
    };

    let parsed = parse_model_output(PAYLOAD, &ExtractionConfig::default()).unwrap();
    let expected: HashSet<String> = ["17".to_string(), "18".to_string()].into_iter().collect();
    let discrepancies = parsed.discrepancies(&expected);

    let feedback =
        corrective_feedback(invalid.issues(), &discrepancies, &FeedbackConfig::default()).unwrap();
    let lines: Vec<&str> = feedback.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Your previous response did not match"));
    assert!(lines[1].starts_with("- classifications[0].subcategory (file_id '17'):"));
    assert!(lines[1].ends_with("(hint: 'Photos' belongs to Images, Personal, or use null)"));
    assert_eq!(lines[2], "- Missing file_ids: 18");
}

#[test]
fn feedback_is_capped() {
    let bad = PAYLOAD.replace(r#"["python", "automation"]"#, r#"["A", "B", "C", "D", "E", "F"]"#);
    let err = parse_model_output(&bad, &ExtractionConfig::default()).unwrap_err();
    let config = FeedbackConfig {
        max_issues: 3,
        suggest_categories: false,
    };
    let feedback = feedback_for_error(&err, &config);
    let lines: Vec<&str> = feedback.lines().collect();
    // tag count plus two rules per tag: 13 issues.
    assert_eq!(lines.len(), 1 + 3 + 1);
    assert_eq!(lines[4], "- ... and 10 more issue(s)");
}
