//! Turns validation results into corrective instructions for a retry of the
//! upstream generation.

use crate::category::categories_with_subcategory;
use crate::completeness::Discrepancy;
use crate::config::FeedbackConfig;
use crate::error::{Issue, ParseError, Violation};

const HEADER: &str = "Your previous response did not match the required schema. \
Fix the following problems and return the complete JSON again:";

/// `None` when there is nothing to correct.
pub fn corrective_feedback(
    issues: &[Issue],
    discrepancies: &[Discrepancy],
    config: &FeedbackConfig,
) -> Option<String> {
    if issues.is_empty() && discrepancies.is_empty() {
        return None;
    }

    let mut out = String::from(HEADER);
    for issue in issues.iter().take(config.max_issues) {
        out.push_str(&format!("\n- {issue}"));
        if config.suggest_categories {
            if let Violation::SubcategoryMismatch { subcategory, .. } = &issue.violation {
                let homes: Vec<&str> = categories_with_subcategory(subcategory)
                    .iter()
                    .map(|c| c.as_str())
                    .collect();
                out.push_str(&format!(
                    " (hint: '{subcategory}' belongs to {}, or use null)",
                    homes.join(", ")
                ));
            }
        }
    }
    if issues.len() > config.max_issues {
        out.push_str(&format!(
            "\n- ... and {} more issue(s)",
            issues.len() - config.max_issues
        ));
    }
    for discrepancy in discrepancies {
        out.push_str(&format!("\n- {discrepancy}"));
    }
    Some(out)
}

/// Feedback for a failed [`crate::extract::parse_model_output`].
pub fn feedback_for_error(err: &ParseError, config: &FeedbackConfig) -> String {
    match err {
        ParseError::Json(e) => format!(
            "{HEADER}\n- the response was not valid JSON ({e}); \
return a single JSON object with a \"classifications\" array"
        ),
        ParseError::Invalid(invalid) => {
            // Never None: a ValidationError carries at least one issue.
            corrective_feedback(invalid.issues(), &[], config).unwrap_or_default()
        }
    }
}
