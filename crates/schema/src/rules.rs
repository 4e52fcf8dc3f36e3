//! Field-level format rules and the subcategory/category cross-check.
//!
//! Each rule is a pure function over an already-typed value and reports
//! every constraint it finds broken.

use crate::category::{is_known_subcategory, Category};
use crate::error::Violation;
use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

pub const TAG_COUNT: RangeInclusive<usize> = 2..=5;
pub const TAG_LENGTH: RangeInclusive<usize> = 2..=30;
pub const SUMMARY_LENGTH: RangeInclusive<usize> = 10..=80;
pub const CONFIDENCE: RangeInclusive<f64> = 0.50..=0.98;
pub const FOLDER_LENGTH: RangeInclusive<usize> = 1..=100;

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9-]+$").expect("tag pattern compiles"))
}

fn folder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9-]+(/[A-Za-z0-9-]+)*$").expect("folder pattern compiles")
    })
}

pub fn check_file_id(file_id: &str) -> Option<Violation> {
    file_id.is_empty().then_some(Violation::EmptyFileId)
}

pub fn check_tag_count(count: usize) -> Option<Violation> {
    (!TAG_COUNT.contains(&count)).then_some(Violation::TagCount(count))
}

/// Length and character class are checked independently, so a tag such as
/// `"A"` reports both.
pub fn check_tag(tag: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    if !TAG_LENGTH.contains(&tag.chars().count()) {
        violations.push(Violation::TagLength(tag.to_string()));
    }
    // An empty tag already failed on length.
    if !tag.is_empty() && !tag_pattern().is_match(tag) {
        violations.push(Violation::TagCharset(tag.to_string()));
    }
    violations
}

pub fn check_summary(summary: &str) -> Option<Violation> {
    let len = summary.chars().count();
    (!SUMMARY_LENGTH.contains(&len)).then_some(Violation::SummaryLength(len))
}

pub fn check_confidence(confidence: f64) -> Option<Violation> {
    (!CONFIDENCE.contains(&confidence)).then_some(Violation::ConfidenceRange(confidence))
}

pub fn check_folder(folder: &str) -> Vec<Violation> {
    let len = folder.chars().count();
    let mut violations = Vec::new();
    if !FOLDER_LENGTH.contains(&len) {
        violations.push(Violation::FolderLength(len));
    }
    if folder.is_empty() {
        return violations;
    }
    if folder.starts_with('/') || folder.ends_with('/') {
        violations.push(Violation::FolderSlash);
    } else if !folder_pattern().is_match(folder) {
        violations.push(Violation::FolderFormat(folder.to_string()));
    }
    violations
}

/// `None` subcategory is always accepted. A name that no category knows is
/// reported differently from a known name filed under the wrong category.
pub fn check_subcategory(category: Category, subcategory: Option<&str>) -> Option<Violation> {
    let sub = subcategory?;
    if category.permits(sub) {
        None
    } else if is_known_subcategory(sub) {
        Some(Violation::SubcategoryMismatch {
            subcategory: sub.to_string(),
            category,
        })
    } else {
        Some(Violation::UnknownSubcategory(sub.to_string()))
    }
}
