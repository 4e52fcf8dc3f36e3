use crate::completeness::{find_discrepancies, Discrepancy};
use crate::error::{json_kind, Issue, ValidationError, Violation};
use crate::models::{parse_file_classification, peek_file_id, FileClassification};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;
use tracing::debug;

/// Root of a model response: a non-empty, ordered list of classifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct FileClassificationResponse {
    classifications: Vec<FileClassification>,
}

impl FileClassificationResponse {
    pub fn classifications(&self) -> &[FileClassification] {
        &self.classifications
    }

    pub fn into_classifications(self) -> Vec<FileClassification> {
        self.classifications
    }

    pub fn len(&self) -> usize {
        self.classifications.len()
    }

    /// Always false for a parsed response.
    pub fn is_empty(&self) -> bool {
        self.classifications.is_empty()
    }

    pub fn file_ids(&self) -> impl Iterator<Item = &str> {
        self.classifications.iter().map(FileClassification::file_id)
    }

    pub fn get(&self, file_id: &str) -> Option<&FileClassification> {
        self.classifications.iter().find(|c| c.file_id() == file_id)
    }

    pub fn discrepancies(&self, expected: &HashSet<String>) -> Vec<Discrepancy> {
        find_discrepancies(self.file_ids(), expected)
    }

    /// Human-readable discrepancy messages; empty when the response covers
    /// exactly the expected ids.
    pub fn check_completeness(&self, expected: &HashSet<String>) -> Vec<String> {
        self.discrepancies(expected)
            .iter()
            .map(Discrepancy::to_string)
            .collect()
    }

    pub fn to_raw(&self) -> Value {
        json!({
            "classifications": self
                .classifications
                .iter()
                .map(FileClassification::to_raw)
                .collect::<Vec<_>>(),
        })
    }
}

impl TryFrom<Value> for FileClassificationResponse {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        parse_response(&value)
    }
}

/// Validates every element of `classifications`. Issues of failing elements
/// are prefixed with their position and labelled with their file_id.
pub fn parse_response(raw: &Value) -> Result<FileClassificationResponse, ValidationError> {
    let items = match raw.get("classifications") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ValidationError::single(Issue::new(
                "classifications",
                Some(other),
                Violation::WrongType {
                    expected: "array",
                    actual: json_kind(other),
                },
            )))
        }
        None if !raw.is_object() => {
            return Err(ValidationError::single(Issue::new(
                "",
                Some(raw),
                Violation::WrongType {
                    expected: "object",
                    actual: json_kind(raw),
                },
            )))
        }
        None => {
            return Err(ValidationError::single(Issue::new(
                "classifications",
                None,
                Violation::MissingField,
            )))
        }
    };

    if let Some(root) = raw.as_object() {
        for key in root.keys().filter(|k| k.as_str() != "classifications") {
            debug!(field = %key, "ignoring unknown response field");
        }
    }

    if items.is_empty() {
        return Err(ValidationError::single(Issue::new(
            "classifications",
            Some(&raw["classifications"]),
            Violation::EmptyClassifications,
        )));
    }

    let mut classifications = Vec::with_capacity(items.len());
    let mut issues = Vec::new();
    for (i, item) in items.iter().enumerate() {
        match parse_file_classification(item) {
            Ok(c) => classifications.push(c),
            Err(err) => {
                let prefix = format!("classifications[{i}]");
                let file_id = peek_file_id(item);
                issues.extend(
                    err.into_issues()
                        .into_iter()
                        .map(|issue| issue.nested(&prefix, file_id.as_deref())),
                );
            }
        }
    }

    if let Some(err) = ValidationError::from_issues(issues) {
        debug!(
            records = items.len(),
            valid = classifications.len(),
            issues = err.len(),
            "classification response failed validation"
        );
        return Err(err);
    }

    debug!(records = classifications.len(), "classification response validated");
    Ok(FileClassificationResponse { classifications })
}
