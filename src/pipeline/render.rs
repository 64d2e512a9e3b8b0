//! Report rendering: serialise the populated structure into PDF bytes.
//!
//! One page per section, in structure (= checklist) order: the section title
//! as a centered bold heading, then each content item as left-aligned
//! wrapped paragraphs. A page break is inserted automatically whenever the
//! content cursor reaches the bottom margin; continuation pages carry no
//! heading. When enabled, an outline (bookmark) entry per section points at
//! the section's first page, which is what makes the output navigable in a
//! viewer's sidebar.
//!
//! ## Why the standard 14 fonts?
//!
//! Helvetica and Helvetica-Bold need no embedding — every conforming reader
//! ships them — so the output stays small and the renderer needs no font
//! files at runtime. The price is WinAnsi-only text, which the normalisation
//! pass has already enforced (`•` → `-`, anything else unrepresentable →
//! `?`). Glyph advances are approximated with a fixed average width; for
//! centering a heading and wrapping body text that is accurate enough, and
//! it avoids carrying AFM metrics tables.

use crate::config::AssemblyConfig;
use crate::error::ReportError;
use crate::pipeline::normalize;
use crate::structure::ReportStructure;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::{debug, info};

/// Approximate advance width of a Helvetica glyph, as a fraction of the
/// font size. Slightly generous so wrapped lines err on the short side.
const AVG_GLYPH_WIDTH: f32 = 0.52;

/// Vertical gap between the heading and the first content item, in points.
const HEADING_GAP: f32 = 10.0;

/// Extra vertical gap between content items, in points.
const ITEM_GAP: f32 = 4.0;

/// Line height as a multiple of the font size.
const LINE_FACTOR: f32 = 1.25;

/// Render the populated structure into an in-memory PDF document.
pub fn render_report(
    structure: &ReportStructure,
    config: &AssemblyConfig,
) -> Result<Vec<u8>, ReportError> {
    let mut writer = ReportWriter::new(config);

    for section in structure.iter() {
        writer.begin_section(&section.title);
        for item in &section.items {
            writer.write_item(item);
        }
    }

    let bytes = writer.finish()?;
    info!(
        "Rendered report: {} sections, {} bytes",
        structure.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Incremental PDF writer: accumulates content operations page by page.
struct ReportWriter {
    doc: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    kids: Vec<ObjectId>,
    /// (title, first page index) per section, for the outline.
    bookmarks: Vec<(String, usize)>,
    ops: Vec<Operation>,
    cursor_y: f32,
    page_open: bool,
    encode_error: Option<String>,
    // Layout constants resolved from config.
    page_width: f32,
    page_height: f32,
    margin: f32,
    heading_size: f32,
    body_size: f32,
    outline: bool,
}

impl ReportWriter {
    fn new(config: &AssemblyConfig) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let body_font = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let heading_font = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => body_font,
                "F2" => heading_font,
            },
        });

        Self {
            doc,
            pages_id,
            resources_id,
            kids: Vec::new(),
            bookmarks: Vec::new(),
            ops: Vec::new(),
            cursor_y: 0.0,
            page_open: false,
            encode_error: None,
            page_width: config.page_width,
            page_height: config.page_height,
            margin: config.margin,
            heading_size: config.heading_size,
            body_size: config.body_size,
            outline: config.outline,
        }
    }

    fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Flush the current page's operations into a page object.
    fn flush_page(&mut self) {
        if !self.page_open {
            return;
        }
        let content = Content {
            operations: std::mem::take(&mut self.ops),
        };
        let encoded = match content.encode() {
            Ok(bytes) => bytes,
            Err(e) => {
                self.encode_error = Some(e.to_string());
                Vec::new()
            }
        };
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Contents" => content_id,
        });
        self.kids.push(page_id);
        self.page_open = false;
    }

    /// Start a fresh page and reset the cursor to the top margin.
    fn new_page(&mut self) {
        self.flush_page();
        self.page_open = true;
        self.cursor_y = self.page_height - self.margin;
    }

    /// Break to a new page when fewer than `needed` points remain.
    fn ensure_room(&mut self, needed: f32) {
        if self.cursor_y - needed < self.margin {
            self.new_page();
        }
    }

    /// Emit one line of text at the cursor and advance it.
    fn emit_line(&mut self, text: &str, font: &[u8], size: f32, x: f32) {
        let line_height = size * LINE_FACTOR;
        self.ensure_room(line_height);
        self.cursor_y -= line_height;

        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![Object::Name(font.to_vec()), size.into()],
        ));
        self.ops
            .push(Operation::new("Td", vec![x.into(), self.cursor_y.into()]));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::String(
                normalize::to_winansi_bytes(text),
                StringFormat::Literal,
            )],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    /// Open a section: always a fresh page, centered heading, bookmark slot.
    fn begin_section(&mut self, title: &str) {
        self.new_page();

        let heading = normalize::normalize_for_pdf(title);
        let est_width = heading.chars().count() as f32 * AVG_GLYPH_WIDTH * self.heading_size;
        let x = self.margin + ((self.content_width() - est_width) / 2.0).max(0.0);
        self.emit_line(&heading, b"F2", self.heading_size, x);
        self.cursor_y -= HEADING_GAP;

        // The page object does not exist until flush; remember the index of
        // the page this section starts on and resolve it in finish().
        let idx = self.kids.len();
        self.bookmarks.push((heading, idx));
        debug!("Section '{}' starts on page {}", title, idx + 1);
    }

    /// Write one content item as wrapped, left-aligned lines.
    fn write_item(&mut self, item: &str) {
        let text = normalize::normalize_for_pdf(item);
        let max_chars =
            (self.content_width() / (AVG_GLYPH_WIDTH * self.body_size)).max(1.0) as usize;

        for raw_line in text.split('\n') {
            if raw_line.is_empty() {
                self.cursor_y -= self.body_size * LINE_FACTOR;
                continue;
            }
            for line in wrap_line(raw_line, max_chars) {
                self.emit_line(&line, b"F1", self.body_size, self.margin);
            }
        }
        self.cursor_y -= ITEM_GAP;
    }

    /// Assemble the page tree, outline, and catalog; serialise to bytes.
    fn finish(mut self) -> Result<Vec<u8>, ReportError> {
        // A zero-page document confuses viewers; emit one blank page for an
        // empty structure.
        if self.kids.is_empty() && !self.page_open {
            self.new_page();
        }
        self.flush_page();

        if let Some(detail) = self.encode_error.take() {
            return Err(ReportError::RenderFailed { detail });
        }

        let kids: Vec<Object> = self.kids.iter().map(|&id| id.into()).collect();
        let count = self.kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => self.resources_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    self.page_width.into(),
                    self.page_height.into(),
                ],
            }),
        );

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        };

        if self.outline && !self.bookmarks.is_empty() {
            // Bookmark page indices were recorded before the pages existed;
            // resolve them against the final kid list now.
            let targets: Vec<(String, ObjectId)> = self
                .bookmarks
                .iter()
                .map(|(title, idx)| {
                    let page = self.kids[(*idx).min(self.kids.len() - 1)];
                    (title.clone(), page)
                })
                .collect();
            let outlines_id = build_outline(&mut self.doc, &targets);
            catalog.set("Outlines", outlines_id);
            catalog.set("PageMode", Object::Name(b"UseOutlines".to_vec()));
        }

        let catalog_id = self.doc.add_object(catalog);
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();

        let mut buf = Vec::new();
        self.doc
            .save_to(&mut buf)
            .map_err(|e| ReportError::RenderFailed {
                detail: e.to_string(),
            })?;
        Ok(buf)
    }
}

/// Create linked outline items (one per section) and the Outlines root.
fn build_outline(doc: &mut Document, targets: &[(String, ObjectId)]) -> ObjectId {
    let outlines_id = doc.new_object_id();
    let item_ids: Vec<ObjectId> = targets.iter().map(|_| doc.new_object_id()).collect();

    for (i, (title, page_id)) in targets.iter().enumerate() {
        let mut item = dictionary! {
            "Title" => Object::String(
                normalize::to_winansi_bytes(title),
                StringFormat::Literal,
            ),
            "Parent" => outlines_id,
            "Dest" => vec![
                Object::Reference(*page_id),
                Object::Name(b"Fit".to_vec()),
            ],
        };
        if i > 0 {
            item.set("Prev", item_ids[i - 1]);
        }
        if i + 1 < item_ids.len() {
            item.set("Next", item_ids[i + 1]);
        }
        doc.objects.insert(item_ids[i], Object::Dictionary(item));
    }

    doc.objects.insert(
        outlines_id,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "First" => item_ids[0],
            "Last" => item_ids[item_ids.len() - 1],
            "Count" => item_ids.len() as i64,
        }),
    );
    outlines_id
}

/// Word-wrap a single line to at most `max_chars` characters per line.
///
/// Words longer than the limit are hard-split rather than overflowing the
/// printable area.
fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if current.is_empty() && word_len <= max_chars {
            current.push_str(word);
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if word_len <= max_chars {
                current.push_str(word);
            } else {
                // Hard-split an over-long word across as many lines as needed.
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(max_chars) {
                    lines.push(chunk.iter().collect());
                }
                if let Some(last) = lines.pop() {
                    current = last;
                }
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
