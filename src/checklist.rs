//! Checklist data model and parsing.
//!
//! The checklist is a user-supplied JSON blob with this top-level shape:
//!
//! ```json
//! { "sections": [
//!     { "title": "Intro",
//!       "ExtractPages": [ { "file": "base.pdf", "type": "pdf", "pages": [2, 1] } ],
//!       "GeneratePlaceholder": "TBD"
//!     }
//! ] }
//! ```
//!
//! ## Why a two-phase parse?
//!
//! Malformed JSON and a structurally wrong checklist are *different* user
//! mistakes and get different error banners. Deserialising straight into
//! [`Checklist`] would collapse both into one serde error, so we first parse
//! into a [`serde_json::Value`], check that `sections` exists and is an
//! array, and only then deserialise the section entries. The `type` field
//! stays a plain string for the same reason: an unknown type must survive
//! parsing so the populator can turn it into the visible
//! `"Unsupported file type: …"` content item instead of a parse failure.

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A parsed checklist: an ordered list of report sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
    pub sections: Vec<Section>,
}

/// One named unit of the output report.
///
/// `ExtractPages` and `GeneratePlaceholder` are each independently optional;
/// a section with neither yields an empty content list and therefore fails
/// validation downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Section title; doubles as the key in the report structure.
    #[serde(default)]
    pub title: String,

    /// Extraction directives, processed in declaration order.
    #[serde(rename = "ExtractPages", default, skip_serializing_if = "Option::is_none")]
    pub extract_pages: Option<Vec<ExtractDirective>>,

    /// Literal string appended as the section's last content item.
    #[serde(
        rename = "GeneratePlaceholder",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub generate_placeholder: Option<String>,
}

/// Instruction to pull text from one uploaded base document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractDirective {
    /// Name of the uploaded document this directive reads from.
    pub file: String,

    /// Declared file type. Absent means `pdf`; unknown values are preserved
    /// verbatim and surface as an "Unsupported file type" content item.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,

    /// 1-based page numbers, in request order. Empty means "all pages"
    /// (PDF-only; images are always whole-image OCR).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<u32>,
}

impl ExtractDirective {
    /// The effective, lowercased file type used for dispatch.
    pub fn kind(&self) -> String {
        self.file_type
            .as_deref()
            .unwrap_or("pdf")
            .to_ascii_lowercase()
    }
}

impl Checklist {
    /// Parse a checklist from raw JSON text.
    ///
    /// # Errors
    /// - [`ReportError::EmptyChecklist`] for empty/whitespace input
    /// - [`ReportError::ChecklistFormat`] for malformed JSON
    /// - [`ReportError::Schema`] when `sections` is missing, not an array,
    ///   or a section entry has the wrong shape
    pub fn parse(input: &str) -> Result<Self, ReportError> {
        if input.trim().is_empty() {
            return Err(ReportError::EmptyChecklist);
        }

        let value: serde_json::Value =
            serde_json::from_str(input).map_err(|e| ReportError::ChecklistFormat {
                detail: e.to_string(),
            })?;

        let sections_value = value.get("sections").ok_or_else(|| ReportError::Schema {
            detail: "the 'sections' key is missing".to_string(),
        })?;
        if !sections_value.is_array() {
            return Err(ReportError::Schema {
                detail: "'sections' must be an array".to_string(),
            });
        }

        let sections: Vec<Section> =
            serde_json::from_value(sections_value.clone()).map_err(|e| ReportError::Schema {
                detail: format!("a section entry has the wrong shape: {e}"),
            })?;

        debug!("Parsed checklist with {} sections", sections.len());
        Ok(Checklist { sections })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            Checklist::parse("   \n"),
            Err(ReportError::EmptyChecklist)
        ));
    }

    #[test]
    fn malformed_json_is_a_format_error() {
        assert!(matches!(
            Checklist::parse("{ not json"),
            Err(ReportError::ChecklistFormat { .. })
        ));
    }

    #[test]
    fn missing_sections_is_a_schema_error() {
        assert!(matches!(
            Checklist::parse(r#"{"chapters": []}"#),
            Err(ReportError::Schema { .. })
        ));
    }

    #[test]
    fn sections_must_be_an_array() {
        assert!(matches!(
            Checklist::parse(r#"{"sections": "Intro"}"#),
            Err(ReportError::Schema { .. })
        ));
    }

    #[test]
    fn minimal_placeholder_section_parses() {
        let c =
            Checklist::parse(r#"{"sections":[{"title":"Intro","GeneratePlaceholder":"TBD"}]}"#)
                .unwrap();
        assert_eq!(c.sections.len(), 1);
        assert_eq!(c.sections[0].title, "Intro");
        assert_eq!(c.sections[0].generate_placeholder.as_deref(), Some("TBD"));
        assert!(c.sections[0].extract_pages.is_none());
    }

    #[test]
    fn directive_defaults_to_pdf_with_all_pages() {
        let c = Checklist::parse(
            r#"{"sections":[{"title":"A","ExtractPages":[{"file":"base.pdf"}]}]}"#,
        )
        .unwrap();
        let d = &c.sections[0].extract_pages.as_ref().unwrap()[0];
        assert_eq!(d.kind(), "pdf");
        assert!(d.pages.is_empty());
    }

    #[test]
    fn directive_type_is_lowercased_not_validated() {
        let c = Checklist::parse(
            r#"{"sections":[{"title":"A","ExtractPages":[{"file":"x","type":"DOCX"}]}]}"#,
        )
        .unwrap();
        let d = &c.sections[0].extract_pages.as_ref().unwrap()[0];
        assert_eq!(d.kind(), "docx");
    }

    #[test]
    fn page_order_is_preserved_verbatim() {
        let c = Checklist::parse(
            r#"{"sections":[{"title":"A","ExtractPages":[{"file":"x","pages":[2,1]}]}]}"#,
        )
        .unwrap();
        let d = &c.sections[0].extract_pages.as_ref().unwrap()[0];
        assert_eq!(d.pages, vec![2, 1]);
    }

    #[test]
    fn directive_missing_file_is_a_schema_error() {
        assert!(matches!(
            Checklist::parse(r#"{"sections":[{"title":"A","ExtractPages":[{"pages":[1]}]}]}"#),
            Err(ReportError::Schema { .. })
        ));
    }
}
