//! Save-path tests: round-tripping archives through save and stream,
//! raw-copy fidelity for untouched entries, and explicit entry
//! replacement.

use std::fs;
use std::io::{Cursor, Read};

use tempfile::TempDir;
use vellum::Document;

mod common;
use common::*;

const CONTENT_TYPES: &str = "<?xml version=\"1.0\"?><Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\"/>";

fn read_entry(bytes: &[u8], name: &str) -> Vec<u8> {
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut entry = zip.by_name(name).unwrap();
    let mut data = Vec::new();
    entry.read_to_end(&mut data).unwrap();
    data
}

// ============================================================================
// Round Trips
// ============================================================================

#[test]
fn test_save_and_reopen_preserves_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.docx");

    let doc = basic_document();
    doc.save(&path).unwrap();

    let mut reopened = Document::open(&path).unwrap();
    assert_eq!(reopened.paragraphs().len(), 2);
    assert_eq!(reopened.text(), "hello\nworld");
}

#[test]
fn test_edits_survive_a_save_cycle() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("edited.docx");

    let mut doc = basic_document();
    let paragraphs = doc.paragraphs();
    paragraphs[0].set_text(&mut doc, "rewritten");
    doc.save(&path).unwrap();

    let mut reopened = Document::open(&path).unwrap();
    assert_eq!(reopened.text(), "rewritten\nworld");
}

#[test]
fn test_stream_matches_saved_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("streamed.docx");

    let mut doc = basic_document();
    let paragraphs = doc.paragraphs();
    paragraphs[1].set_text(&mut doc, "streamed");
    doc.save(&path).unwrap();

    assert_eq!(doc.stream().unwrap(), fs::read(&path).unwrap());
    // The write path is deterministic.
    assert_eq!(doc.stream().unwrap(), doc.stream().unwrap());
}

// ============================================================================
// Raw-Copy Fidelity
// ============================================================================

#[test]
fn test_untouched_entries_are_copied_byte_identical() {
    let mut doc = open(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("word/document.xml", &document_xml(&paragraph(&["draft"]))),
        ("word/fontTable.xml", "<fonts>not even parsed</fonts>"),
    ]);
    let paragraphs = doc.paragraphs();
    paragraphs[0].set_text(&mut doc, "changed");

    let bytes = doc.stream().unwrap();
    // Entries outside the XML model pass through unmodified.
    assert_eq!(read_entry(&bytes, "[Content_Types].xml"), CONTENT_TYPES.as_bytes());
    assert_eq!(
        read_entry(&bytes, "word/fontTable.xml"),
        b"<fonts>not even parsed</fonts>"
    );
    // The body entry was re-serialized with the edit.
    let body = String::from_utf8(read_entry(&bytes, "word/document.xml")).unwrap();
    assert!(body.contains("changed"));
    assert!(!body.contains("draft"));
}

#[test]
fn test_styles_and_headers_are_reserialized() {
    let mut doc = open(&[
        ("word/document.xml", &document_xml(&paragraph(&["body"]))),
        ("word/header1.xml", &document_xml(&paragraph(&["header"]))),
        ("word/styles.xml", &styles_xml(22, full_red_style())),
    ]);
    let styles = doc.styles_configuration().unwrap();
    let style = styles.style_of(&doc, "Red").unwrap();
    style.set(&mut doc, "font_color", Some("0000ff".into())).unwrap();

    let bytes = doc.stream().unwrap();
    let styles_entry = String::from_utf8(read_entry(&bytes, "word/styles.xml")).unwrap();
    assert!(styles_entry.contains("0000ff"));
    assert!(!styles_entry.contains("99403d"));

    let mut reopened = Document::from_bytes(bytes).unwrap();
    let styles = reopened.styles_configuration().unwrap();
    let style = styles.style_of(&reopened, "Red").unwrap();
    assert_eq!(
        style.get(&reopened, "font_color").unwrap(),
        Some(vellum::StyleValue::Str("0000ff".to_string()))
    );
    assert!(reopened.part_xml("header1").is_ok());
    assert_eq!(reopened.text(), "body");
}

// ============================================================================
// Explicit Entry Replacement
// ============================================================================

#[test]
fn test_replace_entry_overrides_and_appends() {
    let mut doc = open(&[
        ("word/document.xml", &document_xml(&paragraph(&["original"]))),
        ("docProps/custom.xml", "<old/>"),
    ]);
    doc.replace_entry("docProps/custom.xml", b"<new/>".to_vec());
    doc.replace_entry("word/extra.xml", b"<added/>".to_vec());

    let bytes = doc.stream().unwrap();
    assert_eq!(read_entry(&bytes, "docProps/custom.xml"), b"<new/>");
    // Replacements with no existing entry are appended.
    assert_eq!(read_entry(&bytes, "word/extra.xml"), b"<added/>");
}

#[test]
fn test_replace_entry_wins_over_the_xml_model() {
    let mut doc = open(&[("word/document.xml", &document_xml(&paragraph(&["model"])))]);
    let paragraphs = doc.paragraphs();
    paragraphs[0].set_text(&mut doc, "edited through the model");
    doc.replace_entry(
        "word/document.xml",
        document_xml(&paragraph(&["explicit"])).into_bytes(),
    );

    let mut reopened = Document::from_bytes(doc.stream().unwrap()).unwrap();
    assert_eq!(reopened.text(), "explicit");
}
