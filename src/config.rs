//! Configuration types for report assembly.
//!
//! All assembly behaviour is controlled through [`AssemblyConfig`], built via
//! its [`AssemblyConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share a config across calls, serialise it for logging, and diff
//! two runs to understand why their outputs differ.
//!
//! # Design choice: explicit OCR configuration
//! The OCR engine location is a per-config value handed to the extractor at
//! construction, never a process-wide default. Two assemblies in the same
//! process can therefore use different tesseract installations (or languages)
//! without stepping on each other.

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default name of the on-disk report file. Each run overwrites it.
pub const DEFAULT_OUTPUT_PATH: &str = "generated_report.pdf";

/// Configuration for a report assembly.
///
/// Built via [`AssemblyConfig::builder()`] or using
/// [`AssemblyConfig::default()`].
///
/// # Example
/// ```rust
/// use docs2report::AssemblyConfig;
///
/// let config = AssemblyConfig::builder()
///     .tesseract_cmd("/usr/local/bin/tesseract")
///     .ocr_language("deu")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// Path where the rendered report is written. Default: `generated_report.pdf`.
    ///
    /// A fixed path shared across runs: every assembly overwrites the
    /// previous one. Concurrent assemblies in one process would race on it —
    /// an accepted limitation of the single-user usage model.
    pub output_path: PathBuf,

    /// Command used to invoke the tesseract OCR binary. Default: `tesseract`.
    ///
    /// Looked up on `PATH` unless an absolute path is given. Replaces the
    /// usual "configure the OCR path once, globally" pattern with an explicit
    /// per-assembly value.
    pub tesseract_cmd: String,

    /// Tesseract language code passed as `-l`. Default: `eng`.
    pub ocr_language: String,

    /// Heading font size in points. Default: 16.
    pub heading_size: f32,

    /// Body font size in points. Default: 12.
    pub body_size: f32,

    /// Page width in points. Default: 595.0 (A4).
    pub page_width: f32,

    /// Page height in points. Default: 842.0 (A4).
    pub page_height: f32,

    /// Page margin in points, applied on all four sides. Default: 36.0.
    pub margin: f32,

    /// Emit a PDF outline (bookmark) entry per section. Default: true.
    ///
    /// Bookmarks are what make the output navigable in a viewer's sidebar;
    /// turning them off produces a marginally smaller file.
    pub outline: bool,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            tesseract_cmd: "tesseract".to_string(),
            ocr_language: "eng".to_string(),
            heading_size: 16.0,
            body_size: 12.0,
            page_width: 595.0,
            page_height: 842.0,
            margin: 36.0,
            outline: true,
        }
    }
}

impl AssemblyConfig {
    /// Create a new builder for `AssemblyConfig`.
    pub fn builder() -> AssemblyConfigBuilder {
        AssemblyConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`AssemblyConfig`].
#[derive(Debug)]
pub struct AssemblyConfigBuilder {
    config: AssemblyConfig,
}

impl AssemblyConfigBuilder {
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    pub fn tesseract_cmd(mut self, cmd: impl Into<String>) -> Self {
        self.config.tesseract_cmd = cmd.into();
        self
    }

    pub fn ocr_language(mut self, lang: impl Into<String>) -> Self {
        self.config.ocr_language = lang.into();
        self
    }

    pub fn heading_size(mut self, pt: f32) -> Self {
        self.config.heading_size = pt.clamp(6.0, 72.0);
        self
    }

    pub fn body_size(mut self, pt: f32) -> Self {
        self.config.body_size = pt.clamp(6.0, 72.0);
        self
    }

    pub fn page_size(mut self, width: f32, height: f32) -> Self {
        self.config.page_width = width;
        self.config.page_height = height;
        self
    }

    pub fn margin(mut self, pt: f32) -> Self {
        self.config.margin = pt.max(0.0);
        self
    }

    pub fn outline(mut self, v: bool) -> Self {
        self.config.outline = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AssemblyConfig, ReportError> {
        let c = &self.config;
        if c.tesseract_cmd.trim().is_empty() {
            return Err(ReportError::InvalidConfig(
                "tesseract command must not be empty".into(),
            ));
        }
        if c.ocr_language.trim().is_empty() {
            return Err(ReportError::InvalidConfig(
                "OCR language must not be empty".into(),
            ));
        }
        if c.heading_size < c.body_size {
            return Err(ReportError::InvalidConfig(format!(
                "heading size ({}) must be >= body size ({})",
                c.heading_size, c.body_size
            )));
        }
        if c.page_width <= 2.0 * c.margin || c.page_height <= 2.0 * c.margin {
            return Err(ReportError::InvalidConfig(format!(
                "margins ({}) leave no printable area on a {}x{} page",
                c.margin, c.page_width, c.page_height
            )));
        }
        Ok(self.config)
    }
}
