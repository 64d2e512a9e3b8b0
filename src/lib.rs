//! # docs2report
//!
//! Assemble a navigable PDF report from a JSON checklist and a set of base
//! documents.
//!
//! ## Why this crate?
//!
//! Compliance packets, audit binders, and project dossiers are usually glued
//! together by hand: open five PDFs, copy the relevant pages, paste a "to be
//! provided" note where a document is still missing, export. This crate turns
//! that routine into data. A checklist declares the report's sections and, per
//! section, which pages of which uploaded document belong there (or which
//! placeholder text stands in for them); the pipeline extracts, validates
//! completeness, and renders a single bookmarked PDF.
//!
//! Extraction failures are deliberately *soft*: a missing file, an unsupported
//! type, or an unreadable page becomes descriptive text inside the report
//! rather than an aborted run, so a draft report always shows exactly what is
//! still wrong with it.
//!
//! ## Pipeline Overview
//!
//! ```text
//! checklist JSON + base documents
//!  │
//!  ├─ 1. Parse      checklist → sections (ExtractPages / GeneratePlaceholder)
//!  ├─ 2. Structure  one ordered entry per distinct section title
//!  ├─ 3. Populate   PDF page text (lopdf) / image OCR (tesseract) / placeholder
//!  ├─ 4. Validate   every section must have ≥1 content item
//!  └─ 5. Render     headed sections, WinAnsi text, outline bookmarks
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docs2report::{assemble_to_file, AssemblyConfig, BaseDocuments};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let checklist = std::fs::read_to_string("checklist.json")?;
//!     let documents = BaseDocuments::from_paths(&["q3_financials.pdf", "site_photo.png"])?;
//!     let config = AssemblyConfig::default(); // writes generated_report.pdf
//!     let output = assemble_to_file(&checklist, &documents, &config)?;
//!     eprintln!("{} sections, {} bytes", output.stats.sections, output.stats.pdf_bytes);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `docs2report` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! docs2report = { version = "0.3", default-features = false }
//! ```
//!
//! ## OCR
//!
//! Image sections are read by shelling out to the `tesseract` binary; its
//! command name and language are [`AssemblyConfig`] values. Without tesseract
//! installed, image directives produce an inline "Error extracting text from
//! image" note instead of content — the rest of the pipeline is unaffected.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod assemble;
pub mod checklist;
pub mod config;
pub mod documents;
pub mod error;
pub mod pipeline;
pub mod structure;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use assemble::{assemble, assemble_to_file, populate_structure, AssemblyOutput, AssemblyStats};
pub use checklist::{Checklist, ExtractDirective, Section};
pub use config::{AssemblyConfig, AssemblyConfigBuilder, DEFAULT_OUTPUT_PATH};
pub use documents::BaseDocuments;
pub use error::{ExtractError, ReportError};
pub use pipeline::extract::Extractor;
pub use pipeline::validate::{validate, Validation, VALIDATION_PASSED};
pub use structure::{ReportStructure, SectionContent};
