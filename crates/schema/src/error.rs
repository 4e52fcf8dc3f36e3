//! Validation error taxonomy.
//!
//! A single rule failure is a [`Violation`]. It is located in the payload by
//! an [`Issue`], and every issue found while parsing is accumulated into one
//! [`ValidationError`].

use crate::category::{category_names, Category};
use serde::ser::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationClass {
    /// A field fails its own constraint.
    Format,
    /// Subcategory does not fit the chosen category.
    CrossField,
    /// Missing field, wrong JSON type or empty sequence.
    Structural,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("file_id must be non-empty")]
    EmptyFileId,
    #[error("invalid category '{0}'; expected one of: {}", category_names())]
    UnknownCategory(String),
    #[error("expected 2-5 tags, got {0}")]
    TagCount(usize),
    #[error("tag '{0}' must be 2-30 characters")]
    TagLength(String),
    #[error("tag '{0}' must be lowercase alphanumeric with hyphens only")]
    TagCharset(String),
    #[error("summary must be 10-80 characters, got {0}")]
    SummaryLength(usize),
    #[error("confidence must be between 0.50 and 0.98, got {0}")]
    ConfidenceRange(f64),
    #[error("folder path must be 1-100 characters, got {0}")]
    FolderLength(usize),
    #[error("folder path must not have leading or trailing slashes")]
    FolderSlash,
    #[error("invalid folder path format: {0}")]
    FolderFormat(String),

    #[error(
        "subcategory '{subcategory}' not valid for category '{category}'; valid options: {}",
        valid_options(.category)
    )]
    SubcategoryMismatch {
        subcategory: String,
        category: Category,
    },
    #[error("unknown subcategory '{0}', must be null or a predefined value")]
    UnknownSubcategory(String),

    #[error("missing required field")]
    MissingField,
    #[error("expected {expected}, got {actual}")]
    WrongType {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("classifications must contain at least one entry")]
    EmptyClassifications,
}

impl Violation {
    pub fn class(&self) -> ViolationClass {
        match self {
            Violation::SubcategoryMismatch { .. } | Violation::UnknownSubcategory(_) => {
                ViolationClass::CrossField
            }
            Violation::MissingField
            | Violation::WrongType { .. }
            | Violation::EmptyClassifications => ViolationClass::Structural,
            _ => ViolationClass::Format,
        }
    }

    /// Stable machine-readable rule code.
    pub fn rule(&self) -> &'static str {
        match self {
            Violation::EmptyFileId => "file_id_empty",
            Violation::UnknownCategory(_) => "category_unknown",
            Violation::TagCount(_) => "tag_count",
            Violation::TagLength(_) => "tag_length",
            Violation::TagCharset(_) => "tag_charset",
            Violation::SummaryLength(_) => "summary_length",
            Violation::ConfidenceRange(_) => "confidence_range",
            Violation::FolderLength(_) => "folder_length",
            Violation::FolderSlash => "folder_slash",
            Violation::FolderFormat(_) => "folder_format",
            Violation::SubcategoryMismatch { .. } => "subcategory_mismatch",
            Violation::UnknownSubcategory(_) => "subcategory_unknown",
            Violation::MissingField => "missing_field",
            Violation::WrongType { .. } => "wrong_type",
            Violation::EmptyClassifications => "classifications_empty",
        }
    }
}

fn valid_options(category: &Category) -> String {
    let subs = category.subcategories();
    if subs.is_empty() {
        "null only".to_string()
    } else {
        format!("{{{}}}", subs.join(", "))
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One violated constraint, located in the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Field path, e.g. `tags[1]` or `classifications[2].summary`.
    pub path: String,
    /// file_id of the enclosing record, when it could be read.
    pub file_id: Option<String>,
    /// The offending value, if the field was present.
    pub value: Option<Value>,
    pub violation: Violation,
}

impl Issue {
    pub fn new(path: impl Into<String>, value: Option<&Value>, violation: Violation) -> Self {
        Self {
            path: path.into(),
            file_id: None,
            value: value.cloned(),
            violation,
        }
    }

    pub fn class(&self) -> ViolationClass {
        self.violation.class()
    }

    pub(crate) fn nested(mut self, prefix: &str, file_id: Option<&str>) -> Self {
        self.path = if self.path.is_empty() {
            prefix.to_string()
        } else {
            format!("{prefix}.{}", self.path)
        };
        if self.file_id.is_none() {
            self.file_id = file_id.map(str::to_string);
        }
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "<root>" } else { &self.path };
        match &self.file_id {
            Some(id) => write!(f, "{path} (file_id '{id}'): {}", self.violation),
            None => write!(f, "{path}: {}", self.violation),
        }
    }
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct Report<'a> {
            path: &'a str,
            file_id: Option<&'a str>,
            class: ViolationClass,
            rule: &'static str,
            message: String,
            value: Option<&'a Value>,
        }

        Report {
            path: &self.path,
            file_id: self.file_id.as_deref(),
            class: self.class(),
            rule: self.violation.rule(),
            message: self.violation.to_string(),
            value: self.value.as_ref(),
        }
        .serialize(serializer)
    }
}

/// Every issue found while parsing a payload. Never empty.
#[derive(Debug, Clone, PartialEq, Error, serde::Serialize)]
#[error("{} validation issue(s): {}", .issues.len(), join_issues(.issues))]
pub struct ValidationError {
    issues: Vec<Issue>,
}

fn join_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(Issue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Returns `None` when there is nothing to report.
    pub fn from_issues(issues: Vec<Issue>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self { issues })
        }
    }

    pub fn single(issue: Issue) -> Self {
        Self {
            issues: vec![issue],
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_class(&self, class: ViolationClass) -> bool {
        self.issues.iter().any(|i| i.class() == class)
    }
}

/// Failure to turn raw model text into a validated response.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("model output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
