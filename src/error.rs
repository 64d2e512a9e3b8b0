//! Error types for the docs2report library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ReportError`] — **Fatal**: the assembly cannot proceed at all
//!   (empty checklist, malformed JSON, missing `sections`, validation
//!   failure, output write failure). Returned as `Err(ReportError)` from the
//!   top-level `assemble*` functions.
//!
//! * [`ExtractError`] — **Non-fatal**: a single extraction directive failed
//!   (page out of range, unreadable image, OCR launch failure). The populator
//!   converts it to an inline content string so the failure is *visible in
//!   the rendered report* rather than aborting the run.
//!
//! The separation implements the two-tier policy: soft failures become text,
//! hard failures abort and produce no output file.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the docs2report library.
///
/// Per-directive failures use [`ExtractError`] and are flattened into report
/// content by the populator rather than propagated here.
#[derive(Debug, Error)]
pub enum ReportError {
    // ── Checklist errors ──────────────────────────────────────────────────
    /// The checklist input was empty or whitespace-only.
    #[error("Checklist input is empty. Provide a JSON checklist with a 'sections' array.")]
    EmptyChecklist,

    /// The checklist text is not valid JSON.
    #[error("Invalid JSON format: {detail}\nPlease check your checklist input.")]
    ChecklistFormat { detail: String },

    /// The checklist parsed as JSON but does not have the required shape.
    #[error("Invalid checklist format: {detail}\nEnsure it includes a 'sections' key with a list of sections.")]
    Schema { detail: String },

    // ── Document errors ───────────────────────────────────────────────────
    /// A base document path given to the loader was not found.
    #[error("Base document not found: '{path}'\nCheck the path exists and is readable.")]
    DocumentNotFound { path: PathBuf },

    /// A base document could not be read.
    #[error("Failed to read base document '{path}': {source}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Validation ────────────────────────────────────────────────────────
    /// A section ended up with zero content items.
    #[error("{message}")]
    Validation { message: String },

    // ── Rendering / output ────────────────────────────────────────────────
    /// Building or serialising the output PDF failed.
    #[error("Failed to render report PDF: {detail}")]
    RenderFailed { detail: String },

    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

/// A non-fatal error for a single extraction directive.
///
/// Never escapes the populator: its `Display` output becomes part of an
/// inline content string (`"Error extracting pages: …"` or
/// `"Error extracting text from image: …"`) in the affected section.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The document bytes could not be parsed as a PDF.
    #[error("not a readable PDF: {detail}")]
    PdfParse { detail: String },

    /// A requested 1-based page number is outside the document's range.
    #[error("page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: u32, total: u32 },

    /// lopdf failed to decode the text of a page that does exist.
    #[error("could not extract text of page {page}: {detail}")]
    PageText { page: u32, detail: String },

    /// The document bytes could not be decoded as a raster image.
    #[error("not a readable image: {detail}")]
    ImageDecode { detail: String },

    /// The OCR scratch file could not be written.
    #[error("could not stage image for OCR: {0}")]
    OcrStage(#[from] std::io::Error),

    /// The OCR binary could not be started (missing, not executable).
    #[error("could not run '{program}': {detail}")]
    OcrLaunch { program: String, detail: String },

    /// The OCR binary ran but exited unsuccessfully.
    #[error("OCR failed: {detail}")]
    OcrFailed { detail: String },
}
