use crate::category::Category;
use crate::error::{json_kind, Issue, ValidationError, Violation};
use crate::rules;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

const KNOWN_FIELDS: [&str; 7] = [
    "file_id",
    "category",
    "subcategory",
    "tags",
    "summary",
    "confidence",
    "suggested_folder",
];

/// Validated classification of a single file.
///
/// Only obtainable through [`parse_file_classification`] (or `Deserialize`,
/// which routes through it), so every instance satisfies the field rules and
/// the subcategory/category constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct FileClassification {
    file_id: String,
    category: Category,
    subcategory: Option<String>,
    tags: Vec<String>,
    summary: String,
    confidence: f64,
    suggested_folder: String,
}

impl FileClassification {
    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn subcategory(&self) -> Option<&str> {
        self.subcategory.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn suggested_folder(&self) -> &str {
        &self.suggested_folder
    }

    /// The record in the same loose shape it was parsed from.
    pub fn to_raw(&self) -> Value {
        json!({
            "file_id": self.file_id,
            "category": self.category.as_str(),
            "subcategory": self.subcategory,
            "tags": self.tags,
            "summary": self.summary,
            "confidence": self.confidence,
            "suggested_folder": self.suggested_folder,
        })
    }
}

impl TryFrom<Value> for FileClassification {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        parse_file_classification(&value)
    }
}

/// Collects issues while pulling typed fields out of a JSON object.
struct Fields<'a> {
    obj: &'a Map<String, Value>,
    issues: Vec<Issue>,
}

impl<'a> Fields<'a> {
    fn required(&mut self, name: &str) -> Option<&'a Value> {
        let value = self.obj.get(name);
        if value.is_none() {
            self.issues.push(Issue::new(name, None, Violation::MissingField));
        }
        value
    }

    fn report(&mut self, path: impl Into<String>, value: &Value, violation: Violation) {
        self.issues.push(Issue::new(path, Some(value), violation));
    }

    fn string(&mut self, name: &str) -> Option<&'a str> {
        let value = self.required(name)?;
        match value {
            Value::String(s) => Some(s.as_str()),
            other => {
                self.report(name, other, wrong_type("string", other));
                None
            }
        }
    }
}

fn wrong_type(expected: &'static str, actual: &Value) -> Violation {
    Violation::WrongType {
        expected,
        actual: json_kind(actual),
    }
}

/// Reads `file_id` without validating it. Used to label issues of records
/// that fail validation.
pub(crate) fn peek_file_id(raw: &Value) -> Option<String> {
    match raw.get("file_id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

/// Validates a loosely-typed record and builds a [`FileClassification`].
///
/// All fields are checked and every failure is reported; the cross-field
/// subcategory check only runs once `file_id` and `category` are valid.
pub fn parse_file_classification(raw: &Value) -> Result<FileClassification, ValidationError> {
    let Some(obj) = raw.as_object() else {
        return Err(ValidationError::single(Issue::new(
            "",
            Some(raw),
            wrong_type("object", raw),
        )));
    };
    let mut fields = Fields {
        obj,
        issues: Vec::new(),
    };

    for key in obj.keys().filter(|k| !KNOWN_FIELDS.contains(&k.as_str())) {
        debug!(field = %key, "ignoring unknown classification field");
    }

    // file_id: string, or an integer carried as its decimal form.
    let file_id = fields.required("file_id").and_then(|value| match value {
        Value::String(s) => match rules::check_file_id(s) {
            Some(v) => {
                fields.report("file_id", value, v);
                None
            }
            None => Some(s.clone()),
        },
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        other => {
            fields.report("file_id", other, wrong_type("string", other));
            None
        }
    });

    let category = fields.string("category").and_then(|s| match s.parse::<Category>() {
        Ok(c) => Some(c),
        Err(_) => {
            let violation = Violation::UnknownCategory(s.to_string());
            fields.report("category", &obj["category"], violation);
            None
        }
    });

    // Absent and null both mean "no subcategory". The outer Option is None
    // when the field had the wrong type.
    let subcategory: Option<Option<String>> = match obj.get("subcategory") {
        None | Some(Value::Null) => Some(None),
        Some(Value::String(s)) => Some(Some(s.clone())),
        Some(other) => {
            fields.report("subcategory", other, wrong_type("string or null", other));
            None
        }
    };

    let tags = match fields.required("tags") {
        Some(Value::Array(items)) => {
            if let Some(v) = rules::check_tag_count(items.len()) {
                fields.report("tags", &obj["tags"], v);
            }
            let mut tags = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let path = format!("tags[{i}]");
                match item {
                    Value::String(tag) => {
                        for v in rules::check_tag(tag) {
                            fields.report(path.clone(), item, v);
                        }
                        tags.push(tag.clone());
                    }
                    other => fields.report(path, other, wrong_type("string", other)),
                }
            }
            Some(tags)
        }
        Some(other) => {
            fields.report("tags", other, wrong_type("array", other));
            None
        }
        None => None,
    };

    let summary = fields.string("summary");
    if let Some(v) = summary.and_then(rules::check_summary) {
        fields.report("summary", &obj["summary"], v);
    }

    let confidence = fields.required("confidence").and_then(|value| {
        match value.as_f64() {
            Some(c) => match rules::check_confidence(c) {
                Some(v) => {
                    fields.report("confidence", value, v);
                    None
                }
                None => Some(c),
            },
            None => {
                fields.report("confidence", value, wrong_type("number", value));
                None
            }
        }
    });

    let suggested_folder = fields.string("suggested_folder");
    if let Some(folder) = suggested_folder {
        for v in rules::check_folder(folder) {
            fields.report("suggested_folder", &obj["suggested_folder"], v);
        }
    }

    if let (Some(_), Some(category), Some(Some(sub))) = (&file_id, category, &subcategory) {
        if let Some(v) = rules::check_subcategory(category, Some(sub.as_str())) {
            fields.report("subcategory", &obj["subcategory"], v);
        }
    }

    let issues = fields.issues;
    match (file_id, category, subcategory, tags, summary, confidence, suggested_folder) {
        (
            Some(file_id),
            Some(category),
            Some(subcategory),
            Some(tags),
            Some(summary),
            Some(confidence),
            Some(suggested_folder),
        ) if issues.is_empty() => Ok(FileClassification {
            file_id,
            category,
            subcategory,
            tags,
            summary: summary.to_string(),
            confidence,
            suggested_folder: suggested_folder.to_string(),
        }),
        (file_id, ..) => {
            // A field without a recorded issue still fails the record.
            let err = ValidationError::from_issues(issues).unwrap_or_else(|| {
                ValidationError::single(Issue::new("", Some(raw), Violation::MissingField))
            });
            debug!(
                file_id = file_id.as_deref().unwrap_or("<unknown>"),
                issues = err.len(),
                "classification failed validation"
            );
            Err(err)
        }
    }
}
