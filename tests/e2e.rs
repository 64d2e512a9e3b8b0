//! End-to-end integration tests for docs2report.
//!
//! Every scenario here is self-contained: base PDFs are synthesised with
//! lopdf inside the test, and the rendered report is read back with lopdf to
//! assert on its text. Only the OCR test touches anything outside the crate
//! (the tesseract binary) and it skips itself when the binary is absent.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture

use docs2report::{
    assemble, assemble_to_file, AssemblyConfig, BaseDocuments, ReportError,
};
use lopdf::{dictionary, Document, Object, Stream};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Build a minimal text PDF with one page per entry, Helvetica/WinAnsi.
fn make_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = lopdf::content::Content {
            operations: vec![
                lopdf::content::Operation::new("BT", vec![]),
                lopdf::content::Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), 12.into()],
                ),
                lopdf::content::Operation::new("Td", vec![50.into(), 700.into()]),
                lopdf::content::Operation::new("Tj", vec![Object::string_literal(*text)]),
                lopdf::content::Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Concatenated text of every page of a rendered report.
fn extracted_text(pdf: &[u8]) -> String {
    let doc = Document::load_mem(pdf).expect("rendered report must parse");
    let mut out = String::new();
    let total = doc.get_pages().len() as u32;
    for page in 1..=total {
        out.push_str(&doc.extract_text(&[page]).expect("page text"));
    }
    out
}

fn page_count(pdf: &[u8]) -> usize {
    Document::load_mem(pdf).unwrap().get_pages().len()
}

// ── Full pipeline scenarios ──────────────────────────────────────────────────

#[test]
fn placeholder_report_renders_and_serialises() {
    let checklist = r#"{"sections":[{"title":"Intro","GeneratePlaceholder":"TBD"}]}"#;
    let output = assemble(checklist, &BaseDocuments::new(), &AssemblyConfig::default()).unwrap();

    assert_eq!(output.validation_message, "Validation Passed");
    assert_eq!(
        serde_json::to_string(&output.structure).unwrap(),
        r#"{"Intro":["TBD"]}"#
    );
    assert_eq!(page_count(&output.pdf), 1);

    let text = extracted_text(&output.pdf);
    assert!(text.contains("Intro"), "heading missing: {text:?}");
    assert!(text.contains("TBD"), "placeholder missing: {text:?}");
}

#[test]
fn extracted_pages_appear_in_request_order() {
    let mut docs = BaseDocuments::new();
    docs.insert("fin.pdf", make_pdf(&["REVENUE TABLE", "EXPENSE TABLE"]));

    let checklist = r#"{"sections":[{
        "title":"Financials",
        "ExtractPages":[{"file":"fin.pdf","type":"pdf","pages":[2,1]}]
    }]}"#;
    let output = assemble(checklist, &docs, &AssemblyConfig::default()).unwrap();

    let items = output.structure.items("Financials").unwrap();
    assert_eq!(items.len(), 1, "one directive, one content item");
    let expense = items[0].find("EXPENSE TABLE").expect("page 2 text");
    let revenue = items[0].find("REVENUE TABLE").expect("page 1 text");
    assert!(
        expense < revenue,
        "page 2 must precede page 1: {:?}",
        items[0]
    );

    let text = extracted_text(&output.pdf);
    assert!(text.find("EXPENSE TABLE").unwrap() < text.find("REVENUE TABLE").unwrap());
}

#[test]
fn missing_document_becomes_inline_note_and_still_renders() {
    let checklist = r#"{"sections":[{
        "title":"Evidence",
        "ExtractPages":[{"file":"gone.pdf"}]
    }]}"#;
    let output = assemble(checklist, &BaseDocuments::new(), &AssemblyConfig::default()).unwrap();

    assert_eq!(
        output.structure.items("Evidence").unwrap(),
        &["File 'gone.pdf' not found."]
    );
    assert_eq!(output.stats.soft_failures, 1);
    assert!(extracted_text(&output.pdf).contains("File 'gone.pdf' not found."));
}

#[test]
fn unsupported_type_becomes_inline_note() {
    let mut docs = BaseDocuments::new();
    docs.insert("memo.docx", vec![0u8; 16]);

    let checklist = r#"{"sections":[{
        "title":"Memos",
        "ExtractPages":[{"file":"memo.docx","type":"docx"}]
    }]}"#;
    let output = assemble(checklist, &docs, &AssemblyConfig::default()).unwrap();

    assert_eq!(
        output.structure.items("Memos").unwrap(),
        &["Unsupported file type: docx"]
    );
}

#[test]
fn first_empty_section_fails_validation_without_a_pdf() {
    let checklist = r#"{"sections":[
        {"title":"Intro","GeneratePlaceholder":"TBD"},
        {"title":"Evidence"},
        {"title":"Appendix"}
    ]}"#;
    let err = assemble(checklist, &BaseDocuments::new(), &AssemblyConfig::default()).unwrap_err();

    match err {
        ReportError::Validation { message } => {
            assert_eq!(message, "Missing content for section: Evidence");
        }
        other => panic!("expected validation failure, got: {other}"),
    }
}

#[test]
fn malformed_checklist_is_rejected_before_documents_are_read() {
    // The "document" is garbage; a schema failure must occur first.
    let mut docs = BaseDocuments::new();
    docs.insert("x.pdf", b"not a pdf".to_vec());

    let err = assemble(r#"{"sections": 42}"#, &docs, &AssemblyConfig::default()).unwrap_err();
    assert!(matches!(err, ReportError::Schema { .. }), "got: {err}");

    let err = assemble("{not json", &docs, &AssemblyConfig::default()).unwrap_err();
    assert!(matches!(err, ReportError::ChecklistFormat { .. }), "got: {err}");

    let err = assemble("", &docs, &AssemblyConfig::default()).unwrap_err();
    assert!(matches!(err, ReportError::EmptyChecklist), "got: {err}");
}

#[test]
fn bullets_render_as_hyphens() {
    let checklist = r#"{"sections":[{
        "title":"Notes",
        "GeneratePlaceholder":"• first point\n• second point"
    }]}"#;
    let output = assemble(checklist, &BaseDocuments::new(), &AssemblyConfig::default()).unwrap();

    let text = extracted_text(&output.pdf);
    assert!(text.contains("- first point"), "got: {text:?}");
    assert!(text.contains("- second point"), "got: {text:?}");
    assert!(!text.contains('\u{2022}'), "bullet survived: {text:?}");
}

#[test]
fn each_section_starts_its_own_page_with_outline() {
    let checklist = r#"{"sections":[
        {"title":"One","GeneratePlaceholder":"a"},
        {"title":"Two","GeneratePlaceholder":"b"},
        {"title":"Three","GeneratePlaceholder":"c"}
    ]}"#;
    let output = assemble(checklist, &BaseDocuments::new(), &AssemblyConfig::default()).unwrap();

    assert_eq!(page_count(&output.pdf), 3);
    let doc = Document::load_mem(&output.pdf).unwrap();
    assert!(
        doc.catalog().unwrap().has(b"Outlines"),
        "outline expected by default"
    );
}

#[test]
fn outline_can_be_disabled() {
    let config = AssemblyConfig::builder().outline(false).build().unwrap();
    let checklist = r#"{"sections":[{"title":"One","GeneratePlaceholder":"a"}]}"#;
    let output = assemble(checklist, &BaseDocuments::new(), &config).unwrap();

    let doc = Document::load_mem(&output.pdf).unwrap();
    assert!(!doc.catalog().unwrap().has(b"Outlines"));
}

#[test]
fn duplicate_section_titles_merge_into_one_section() {
    let mut docs = BaseDocuments::new();
    docs.insert("a.pdf", make_pdf(&["ALPHA"]));

    let checklist = r#"{"sections":[
        {"title":"Evidence","ExtractPages":[{"file":"a.pdf"}]},
        {"title":"Evidence","GeneratePlaceholder":"more to come"}
    ]}"#;
    let output = assemble(checklist, &docs, &AssemblyConfig::default()).unwrap();

    assert_eq!(output.stats.sections, 1);
    let items = output.structure.items("Evidence").unwrap();
    assert_eq!(items.len(), 2);
    assert!(items[0].contains("ALPHA"));
    assert_eq!(items[1], "more to come");
    assert_eq!(page_count(&output.pdf), 1);
}

#[test]
fn mixed_checklist_assembles_with_soft_failures_inline() {
    let mut docs = BaseDocuments::new();
    docs.insert("fin.pdf", make_pdf(&["Q3 SUMMARY"]));

    let checklist = r#"{"sections":[
        {"title":"Financials","ExtractPages":[
            {"file":"fin.pdf","pages":[1]},
            {"file":"missing.pdf"}
        ]},
        {"title":"Appendix","GeneratePlaceholder":"To be provided by legal."}
    ]}"#;
    let output = assemble(checklist, &docs, &AssemblyConfig::default()).unwrap();

    let fin = output.structure.items("Financials").unwrap();
    assert_eq!(fin.len(), 2);
    assert!(fin[0].contains("Q3 SUMMARY"));
    assert_eq!(fin[1], "File 'missing.pdf' not found.");

    assert_eq!(output.stats.directives, 2);
    assert_eq!(output.stats.soft_failures, 1);

    let text = extracted_text(&output.pdf);
    assert!(text.contains("Q3 SUMMARY"));
    assert!(text.contains("File 'missing.pdf' not found."));
    assert!(text.contains("To be provided by legal."));
}

// ── File output ──────────────────────────────────────────────────────────────

#[test]
fn assemble_to_file_writes_a_parsable_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("generated_report.pdf");
    let config = AssemblyConfig::builder()
        .output_path(&path)
        .build()
        .unwrap();

    let checklist = r#"{"sections":[{"title":"Intro","GeneratePlaceholder":"TBD"}]}"#;
    assemble_to_file(checklist, &BaseDocuments::new(), &config).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(page_count(&bytes), 1);
}

// ── OCR (requires a tesseract binary; skipped otherwise) ─────────────────────

#[test]
fn ocr_path_runs_when_tesseract_is_installed() {
    let available = std::process::Command::new("tesseract")
        .arg("--version")
        .output()
        .is_ok();
    if !available {
        println!("SKIP — tesseract binary not found on PATH");
        return;
    }

    // A blank white image: OCR must succeed and produce (near-)empty text,
    // proving the decode → stage → invoke path works end to end.
    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        200,
        80,
        image::Rgba([255, 255, 255, 255]),
    ));
    let mut png = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    let extractor = docs2report::Extractor::new(&AssemblyConfig::default());
    let text = extractor
        .extract_text_from_image(&png)
        .expect("OCR over a blank image should succeed");
    assert!(
        text.trim().is_empty(),
        "blank image should yield no text, got: {text:?}"
    );
}
