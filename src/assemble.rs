//! Assembly entry points: the full pipeline in one call.
//!
//! The pipeline is a single linear sequence with no branching back:
//! parse → build structure → populate → validate → render. Validation
//! failure is a hard failure here — the driver must surface the message and
//! must not offer a PDF — so [`assemble`] returns it as
//! [`ReportError::Validation`] rather than an output carrying a flag.
//!
//! [`populate_structure`] runs the same sequence up to (and excluding)
//! rendering; the CLI's `--dry-run` and `--json` modes build on it.

use crate::checklist::Checklist;
use crate::config::AssemblyConfig;
use crate::documents::BaseDocuments;
use crate::error::ReportError;
use crate::pipeline::extract::Extractor;
use crate::pipeline::populate::{populate, PopulateStats};
use crate::pipeline::render::render_report;
use crate::pipeline::validate::validate;
use crate::structure::ReportStructure;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Timing and size counters for one assembly run.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct AssemblyStats {
    /// Sections in the report structure.
    pub sections: usize,
    /// Content items across all sections (extraction results, soft-failure
    /// strings, and placeholders alike).
    pub content_items: usize,
    /// Extraction directives processed.
    pub directives: usize,
    /// Directives that produced an inline failure string.
    pub soft_failures: usize,
    /// Bytes of the rendered PDF.
    pub pdf_bytes: usize,
    /// Time spent populating (extraction + OCR), in milliseconds.
    pub populate_duration_ms: u64,
    /// Time spent rendering the PDF, in milliseconds.
    pub render_duration_ms: u64,
    /// Wall-clock time of the whole run, in milliseconds.
    pub total_duration_ms: u64,
}

/// The result of a successful assembly.
#[derive(Debug)]
pub struct AssemblyOutput {
    /// The populated report structure, read-only from here on.
    pub structure: ReportStructure,
    /// The validator's pass message (always "Validation Passed" here —
    /// a failed validation aborts with [`ReportError::Validation`]).
    pub validation_message: String,
    /// The rendered report document.
    pub pdf: Vec<u8>,
    pub stats: AssemblyStats,
}

/// Parse the checklist, build the structure, and populate it.
///
/// Everything [`assemble`] does short of validation and rendering. The
/// returned structure may legitimately contain empty sections; callers that
/// need the completeness guarantee run the validator (or use [`assemble`]).
pub fn populate_structure(
    checklist_json: &str,
    documents: &BaseDocuments,
    config: &AssemblyConfig,
) -> Result<(ReportStructure, Checklist, PopulateStats), ReportError> {
    let checklist = Checklist::parse(checklist_json)?;
    let mut structure = ReportStructure::from_sections(&checklist.sections)?;
    let extractor = Extractor::new(config);
    let stats = populate(&mut structure, documents, &checklist, &extractor);
    Ok((structure, checklist, stats))
}

/// Assemble a report: the primary entry point for the library.
///
/// # Errors
/// Returns `Err(ReportError)` for every hard failure: empty/malformed
/// checklist, schema violations, validation failure (a section with zero
/// content items), and render problems. Soft failures never surface here —
/// they are already inline text in the structure.
pub fn assemble(
    checklist_json: &str,
    documents: &BaseDocuments,
    config: &AssemblyConfig,
) -> Result<AssemblyOutput, ReportError> {
    let total_start = Instant::now();
    info!(
        "Starting assembly: {} base documents",
        documents.len()
    );

    // ── Step 1: Parse + build + populate ─────────────────────────────────
    let populate_start = Instant::now();
    let (structure, checklist, populate_stats) =
        populate_structure(checklist_json, documents, config)?;
    let populate_duration_ms = populate_start.elapsed().as_millis() as u64;
    debug!(
        "Populated {} sections in {}ms",
        structure.len(),
        populate_duration_ms
    );

    // ── Step 2: Validate completeness ────────────────────────────────────
    let validation = validate(&structure, &checklist);
    if !validation.passed {
        info!("Validation failed: {}", validation.message);
        return Err(ReportError::Validation {
            message: validation.message,
        });
    }

    // ── Step 3: Render ───────────────────────────────────────────────────
    let render_start = Instant::now();
    let pdf = render_report(&structure, config)?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;

    let stats = AssemblyStats {
        sections: structure.len(),
        content_items: structure.item_count(),
        directives: populate_stats.directives,
        soft_failures: populate_stats.soft_failures,
        pdf_bytes: pdf.len(),
        populate_duration_ms,
        render_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Assembly complete: {} sections, {} items, {}ms total",
        stats.sections, stats.content_items, stats.total_duration_ms
    );

    Ok(AssemblyOutput {
        structure,
        validation_message: validation.message,
        pdf,
        stats,
    })
}

/// Assemble a report and write the PDF to the configured output path.
///
/// Uses an atomic write (temp file + rename) so a failed run never leaves a
/// truncated report behind; the previous run's file is overwritten only on
/// success.
pub fn assemble_to_file(
    checklist_json: &str,
    documents: &BaseDocuments,
    config: &AssemblyConfig,
) -> Result<AssemblyOutput, ReportError> {
    let output = assemble(checklist_json, documents, config)?;
    write_pdf(&output.pdf, &config.output_path)?;
    info!("Report written to {}", config.output_path.display());
    Ok(output)
}

fn write_pdf(bytes: &[u8], path: &Path) -> Result<(), ReportError> {
    let map_err = |e: std::io::Error| ReportError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(map_err)?;
    }
    let tmp_path = path.with_extension("pdf.tmp");
    std::fs::write(&tmp_path, bytes).map_err(map_err)?;
    std::fs::rename(&tmp_path, path).map_err(map_err)?;
    Ok(())
}
