//! Validation: every checklist section must have at least one content item.
//!
//! This is a *completeness* check, not a correctness check: an inline
//! soft-failure string counts as content, because its whole purpose is to be
//! visible in the report. The first empty section (in checklist order) fails
//! the run; later empty sections are not enumerated.

use crate::checklist::Checklist;
use crate::structure::ReportStructure;
use tracing::debug;

/// Message returned when every section has content.
pub const VALIDATION_PASSED: &str = "Validation Passed";

/// Outcome of the completeness check; consumed immediately by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub passed: bool,
    pub message: String,
}

/// Check that every section named in the checklist has ≥1 content item.
///
/// Short-circuits on the first failure in checklist order.
pub fn validate(structure: &ReportStructure, checklist: &Checklist) -> Validation {
    for section in &checklist.sections {
        let empty = structure
            .items(&section.title)
            .map_or(true, |items| items.is_empty());
        if empty {
            return Validation {
                passed: false,
                message: format!("Missing content for section: {}", section.title),
            };
        }
    }
    debug!("Validation passed for {} sections", checklist.sections.len());
    Validation {
        passed: true,
        message: VALIDATION_PASSED.to_string(),
    }
}
