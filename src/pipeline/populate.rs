//! Population: walk the checklist and fill the report structure.
//!
//! For each section, `ExtractPages` directives are processed in declaration
//! order and their results appended as content items; the optional
//! `GeneratePlaceholder` value is appended last, unconditionally. Ordering
//! within a section therefore always reads: extraction results first (in
//! directive order), placeholder last.
//!
//! ## Soft failures become content
//!
//! A directive naming an unknown document, an unsupported type, or an
//! extraction/OCR error never aborts the run. Each is converted to a
//! descriptive string that lands in the report itself, so the reader sees
//! *what* failed exactly where the content should have been. The wording of
//! these strings is load-bearing — downstream scenario checks match on it —
//! so it must not be reworded:
//!
//! * `File '{file}' not found.`
//! * `Unsupported file type: {type}`
//! * `Error extracting pages: {detail}`
//! * `Error extracting text from image: {detail}`

use crate::checklist::Checklist;
use crate::documents::BaseDocuments;
use crate::pipeline::extract::Extractor;
use crate::structure::ReportStructure;
use tracing::{debug, warn};

/// Counters for one population pass, reported in the assembly stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct PopulateStats {
    /// Extraction directives processed (including failed ones).
    pub directives: usize,
    /// Placeholders appended.
    pub placeholders: usize,
    /// Directives that produced an inline failure string instead of content.
    pub soft_failures: usize,
}

/// Walk the checklist and append content to the structure in place.
///
/// The structure must have been built from the same checklist's sections;
/// every title the walk touches already has an entry.
pub fn populate(
    structure: &mut ReportStructure,
    documents: &BaseDocuments,
    checklist: &Checklist,
    extractor: &Extractor,
) -> PopulateStats {
    let mut stats = PopulateStats::default();

    for section in &checklist.sections {
        if let Some(directives) = &section.extract_pages {
            for directive in directives {
                stats.directives += 1;
                let item = match documents.get(&directive.file) {
                    None => {
                        warn!(
                            "Section '{}': document '{}' not uploaded",
                            section.title, directive.file
                        );
                        stats.soft_failures += 1;
                        format!("File '{}' not found.", directive.file)
                    }
                    Some(bytes) => match directive.kind().as_str() {
                        "pdf" => extractor
                            .extract_pages(bytes, &directive.pages)
                            .unwrap_or_else(|e| {
                                warn!("Section '{}': {}", section.title, e);
                                stats.soft_failures += 1;
                                format!("Error extracting pages: {e}")
                            }),
                        "png" | "jpg" | "jpeg" => extractor
                            .extract_text_from_image(bytes)
                            .unwrap_or_else(|e| {
                                warn!("Section '{}': {}", section.title, e);
                                stats.soft_failures += 1;
                                format!("Error extracting text from image: {e}")
                            }),
                        other => {
                            warn!(
                                "Section '{}': unsupported type '{}' for '{}'",
                                section.title, other, directive.file
                            );
                            stats.soft_failures += 1;
                            format!("Unsupported file type: {other}")
                        }
                    },
                };
                structure.push(&section.title, item);
            }
        }

        if let Some(placeholder) = &section.generate_placeholder {
            stats.placeholders += 1;
            structure.push(&section.title, placeholder.clone());
        }
    }

    debug!(
        "Populated {} sections: {} directives, {} placeholders, {} soft failures",
        structure.len(),
        stats.directives,
        stats.placeholders,
        stats.soft_failures
    );
    stats
}
