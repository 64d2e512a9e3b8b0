//! Text normalisation: deterministic rules applied to content before layout.
//!
//! ## Why normalise at all?
//!
//! The output report uses the PDF standard fonts with WinAnsi encoding, which
//! covers ASCII plus the Latin-1 block but nothing beyond. Extracted PDF text
//! and OCR output routinely contain characters outside that range — bullet
//! glyphs, smart quotes, CJK — and the renderer must never fail because of
//! one stray code point. Loss at this step is accepted: an unrepresentable
//! character becomes a visible `?` substitution marker rather than an error.
//!
//! Rules are cheap, pure `&str → String` passes applied in a fixed order,
//! each independently testable.

use once_cell::sync::Lazy;
use regex::Regex;

/// Prepare a content string for PDF layout.
///
/// Rules (applied in order):
/// 1. Replace the bullet glyph `•` with a plain hyphen
/// 2. Normalise line endings (CRLF/CR → LF) and tabs (→ four spaces)
/// 3. Substitute every character the output encoding cannot represent
///    with `?`
pub fn normalize_for_pdf(input: &str) -> String {
    let s = input.replace('•', "-");
    let s = s.replace("\r\n", "\n").replace('\r', "\n");
    let s = s.replace('\t', "    ");
    s.chars().map(substitute_unencodable).collect()
}

/// Map a char to itself when WinAnsi-representable, `?` otherwise.
///
/// WinAnsi matches Latin-1 for 0xA0–0xFF; the 0x80–0x9F range holds
/// Windows-specific glyphs we do not map, so those fall to `?` as well.
fn substitute_unencodable(c: char) -> char {
    match c {
        '\n' | '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => c,
        _ => '?',
    }
}

/// Encode an already-normalised string as WinAnsi bytes for a PDF string.
///
/// Callers run [`normalize_for_pdf`] first; anything still above 0xFF
/// becomes `b'?'`.
pub fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| {
            let code = c as u32;
            if code <= 0xFF {
                code as u8
            } else {
                b'?'
            }
        })
        .collect()
}

static RE_BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Light cleanup of raw OCR output.
///
/// Tesseract pads its output with trailing spaces and long runs of empty
/// lines (one per detected block). Trim line ends, collapse 3+ consecutive
/// newlines down to a paragraph break, and drop surrounding whitespace.
pub fn clean_ocr_text(input: &str) -> String {
    let trimmed = input
        .replace("\r\n", "\n")
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    RE_BLANK_RUNS.replace_all(&trimmed, "\n\n").trim().to_string()
}
