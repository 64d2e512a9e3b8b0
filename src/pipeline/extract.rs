//! Content extraction from base documents: PDF page text and image OCR.
//!
//! Two capabilities behind one type, keyed by the directive's declared file
//! type:
//!
//! * [`Extractor::extract_pages`] — parse the document as a paged text
//!   container (lopdf) and concatenate the requested pages' text **in
//!   request order**, or every page in document order when no pages are
//!   requested.
//! * [`Extractor::extract_text_from_image`] — decode the document as a
//!   raster image, stage it as a scratch PNG, and run the configured
//!   tesseract binary over it.
//!
//! A single attempt per directive, no retries: failures return
//! [`ExtractError`] and the populator turns them into inline report text.
//!
//! ## Why shell out for OCR?
//!
//! The tesseract CLI is the stable, universally packaged surface of the
//! engine; linking it natively drags in leptonica and a C++ toolchain for no
//! gain in a pipeline that runs OCR a handful of times per report. The
//! binary's location and language are explicit [`AssemblyConfig`] values, so
//! nothing here touches process-wide state.

use crate::config::AssemblyConfig;
use crate::error::ExtractError;
use crate::pipeline::normalize;
use lopdf::Document;
use std::io::Cursor;
use std::process::Command;
use tracing::{debug, warn};

/// Extracts text from base documents according to one assembly's config.
#[derive(Debug, Clone)]
pub struct Extractor {
    tesseract_cmd: String,
    ocr_language: String,
}

impl Extractor {
    /// Build an extractor from the assembly configuration.
    pub fn new(config: &AssemblyConfig) -> Self {
        Self {
            tesseract_cmd: config.tesseract_cmd.clone(),
            ocr_language: config.ocr_language.clone(),
        }
    }

    /// Extract text from the given pages of a PDF document.
    ///
    /// `pages` holds 1-based page numbers and is honoured verbatim: `[2, 1]`
    /// yields page 2's text before page 1's. An empty slice means every page
    /// in document order. Any page outside `1..=page_count` fails the whole
    /// directive.
    pub fn extract_pages(&self, bytes: &[u8], pages: &[u32]) -> Result<String, ExtractError> {
        let doc = Document::load_mem(bytes).map_err(|e| ExtractError::PdfParse {
            detail: e.to_string(),
        })?;
        let total = doc.get_pages().len() as u32;
        debug!("Loaded PDF with {} pages", total);

        let mut text = String::new();
        if pages.is_empty() {
            for page in 1..=total {
                text.push_str(&page_text(&doc, page)?);
            }
        } else {
            for &page in pages {
                if page == 0 || page > total {
                    return Err(ExtractError::PageOutOfRange { page, total });
                }
                text.push_str(&page_text(&doc, page)?);
            }
        }
        Ok(text)
    }

    /// Run OCR over an image document and return the recognised text.
    pub fn extract_text_from_image(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let img = image::load_from_memory(bytes).map_err(|e| ExtractError::ImageDecode {
            detail: e.to_string(),
        })?;
        debug!("Decoded image {}x{} for OCR", img.width(), img.height());

        // Re-encode as PNG regardless of input format: one staged format
        // keeps the tesseract invocation uniform and strips exotic variants
        // (interlacing, CMYK JPEG) the engine handles poorly.
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| ExtractError::ImageDecode {
                detail: e.to_string(),
            })?;

        let dir = tempfile::tempdir()?;
        let staged = dir.path().join("ocr-input.png");
        std::fs::write(&staged, &png)?;

        let output = Command::new(&self.tesseract_cmd)
            .arg(&staged)
            .arg("stdout")
            .arg("-l")
            .arg(&self.ocr_language)
            .output()
            .map_err(|e| ExtractError::OcrLaunch {
                program: self.tesseract_cmd.clone(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::OcrFailed {
                detail: stderr.trim().to_string(),
            });
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        let text = normalize::clean_ocr_text(&raw);
        debug!("OCR produced {} chars", text.len());
        Ok(text)
    }
}

/// Text of a single 1-based page, with the page number attached to failures.
fn page_text(doc: &Document, page: u32) -> Result<String, ExtractError> {
    doc.extract_text(&[page]).map_err(|e| {
        warn!("Text extraction failed for page {}: {}", page, e);
        ExtractError::PageText {
            page,
            detail: e.to_string(),
        }
    })
}
