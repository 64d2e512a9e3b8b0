//! Pipeline stages for report assembly.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch the PDF backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ populate ──▶ validate ──▶ normalize ──▶ render
//! (lopdf/OCR)  (walk the     (complete-   (bullet /     (output PDF
//!               checklist)    ness check)  encoding)      + bookmarks)
//! ```
//!
//! 1. [`extract`]   — pull text out of one base document: selected PDF pages
//!    or whole-image OCR via the configured tesseract binary
//! 2. [`populate`]  — walk the checklist, dispatch each directive, append
//!    results (and soft-failure strings) to the report structure
//! 3. [`validate`]  — every section must have at least one content item
//! 4. [`normalize`] — deterministic text rules applied before layout
//! 5. [`render`]    — serialise the structure into a paginated, bookmarked
//!    PDF document

pub mod extract;
pub mod normalize;
pub mod populate;
pub mod render;
pub mod validate;
