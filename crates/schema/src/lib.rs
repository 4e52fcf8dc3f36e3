//! Validation schema for model-produced file classifications: category
//! registry, per-record validation, response parsing and completeness checks.

pub mod category;
pub mod completeness;
pub mod config;
pub mod error;
pub mod extract;
pub mod feedback;
pub mod models;
pub mod response;
pub mod rules;

pub use category::{permitted_subcategories, Category};
pub use completeness::Discrepancy;
pub use error::{Issue, ParseError, ValidationError, Violation, ViolationClass};
pub use models::{parse_file_classification, FileClassification};
pub use response::{parse_response, FileClassificationResponse};
