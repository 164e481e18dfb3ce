//! Text-extraction tests over generated PDF fixtures.
//!
//! The fixtures are built in-memory with lopdf so the tests exercise the
//! real extraction path without binary files in the repository.

use std::path::PathBuf;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use lexcodify_codifier::pdf::{extract_pages, fetch_text, render_numbered_text};

/// Build a PDF with one page of Courier text per input string.
fn build_pdf(pages_text: &[&str]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages_text {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
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
    doc
}

/// Save a generated PDF to a temp file and return its path.
fn save_pdf(doc: &mut Document, dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    doc.save(&path).unwrap();
    path
}

#[test]
fn test_extract_single_page() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = build_pdf(&["Section 1. Short title."]);
    let path = save_pdf(&mut doc, &dir, "single.pdf");

    let extracted = extract_pages(&path).unwrap();

    assert_eq!(extracted.pages.len(), 1);
    assert_eq!(extracted.pages[0].number, 1);
    assert!(
        extracted.pages[0].text.contains("Section 1"),
        "unexpected text: {:?}",
        extracted.pages[0].text
    );
}

#[test]
fn test_extract_multiple_pages_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = build_pdf(&["First page body", "Second page body"]);
    let path = save_pdf(&mut doc, &dir, "multi.pdf");

    let extracted = extract_pages(&path).unwrap();

    assert_eq!(extracted.pages.len(), 2);
    assert_eq!(extracted.pages[0].number, 1);
    assert!(extracted.pages[0].text.contains("First page"));
    assert_eq!(extracted.pages[1].number, 2);
    assert!(extracted.pages[1].text.contains("Second page"));

    let paged = extracted.paged_text();
    assert!(paged.contains("--- PAGE 1 ---"));
    assert!(paged.contains("--- PAGE 2 ---"));
}

#[test]
fn test_fetch_text_from_local_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = build_pdf(&["Local fetch works"]);
    let path = save_pdf(&mut doc, &dir, "local.pdf");

    let extracted = fetch_text(&path.to_string_lossy()).unwrap();
    assert!(extracted.full_text().contains("Local fetch works"));
}

#[test]
fn test_numbered_rendering_of_extracted_text() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = build_pdf(&["Numbered line"]);
    let path = save_pdf(&mut doc, &dir, "numbered.pdf");

    let extracted = extract_pages(&path).unwrap();
    let rendered = render_numbered_text(&extracted);

    assert!(rendered.contains("--- PAGE 1 ---"));
    assert!(rendered.contains("   1: "));
}

#[test]
fn test_unreadable_file_fails_with_pdf_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, b"this is not a pdf at all").unwrap();

    let err = extract_pages(&path).unwrap_err();
    assert!(
        err.to_string().contains("Failed to extract text"),
        "got: {err}"
    );
}
